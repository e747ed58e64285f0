//! Fixed-delay pacing between sequential calls.

use archivist_interface::Pacer;
use std::time::Duration;
use tracing::debug;

/// Spaces sequential calls by a fixed delay.
///
/// The delay is a hard floor, not an adaptive backoff. No delay precedes
/// the first call; every later call waits the full delay, so `n` calls
/// incur exactly `n - 1` pauses.
///
/// # Example
///
/// ```rust,ignore
/// let mut throttle = Throttle::new(TokioPacer, Duration::from_secs(30));
/// for id in ids {
///     throttle.wait_turn().await;
///     generator.generate(id).await?;
/// }
/// ```
pub struct Throttle<P: Pacer> {
    pacer: P,
    delay: Duration,
    calls: usize,
    pauses: usize,
}

impl<P: Pacer> Throttle<P> {
    /// Create a throttle that waits `delay` between calls.
    pub fn new(pacer: P, delay: Duration) -> Self {
        Self {
            pacer,
            delay,
            calls: 0,
            pauses: 0,
        }
    }

    /// Whether the next [`wait_turn`](Self::wait_turn) will pause.
    pub fn will_pause(&self) -> bool {
        self.calls > 0 && !self.delay.is_zero()
    }

    /// Wait until the next call may start.
    ///
    /// Returns `true` if a pause was taken.
    pub async fn wait_turn(&mut self) -> bool {
        let paused = if self.will_pause() {
            debug!(delay_ms = self.delay.as_millis() as u64, "Pausing before next call");
            self.pacer.pause(self.delay).await;
            self.pauses += 1;
            true
        } else {
            false
        };
        self.calls += 1;
        paused
    }

    /// Calls admitted so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Pauses taken so far.
    pub fn pauses(&self) -> usize {
        self.pauses
    }

    /// The configured inter-call delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
