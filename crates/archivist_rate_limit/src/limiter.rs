//! Requests-per-minute limiter using governor.
//!
//! The GCRA (Generic Cell Rate Algorithm) used by governor is lock-free, so
//! the limiter can be cloned into every request path of a client.

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

// Type alias for our direct rate limiter
type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Per-client ceiling on requests per minute.
///
/// A limiter built from `None` (or zero) never blocks.
#[derive(Clone)]
pub struct RequestLimiter {
    rpm: Option<u32>,
    limiter: Option<Arc<DirectRateLimiter>>,
}

impl std::fmt::Debug for RequestLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestLimiter")
            .field("rpm", &self.rpm)
            .finish_non_exhaustive()
    }
}

impl RequestLimiter {
    /// Create a limiter allowing `rpm` requests per minute.
    pub fn new(rpm: Option<u32>) -> Self {
        let limiter = rpm.and_then(NonZeroU32::new).map(|n| {
            let quota = Quota::per_minute(n);
            Arc::new(GovernorRateLimiter::direct(quota))
        });
        Self { rpm, limiter }
    }

    /// A limiter that never blocks.
    pub fn unlimited() -> Self {
        Self::new(None)
    }

    /// Configured requests per minute, if any.
    pub fn rpm(&self) -> Option<u32> {
        self.rpm
    }

    /// Wait until one more request is allowed.
    pub async fn acquire(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }

    /// Take a request slot without waiting. Returns `false` if limited.
    pub fn try_acquire(&self) -> bool {
        match &self.limiter {
            Some(limiter) => limiter.check().is_ok(),
            None => true,
        }
    }
}
