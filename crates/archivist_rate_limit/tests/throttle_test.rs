//! Tests for inter-call pacing.

use archivist_interface::Pacer;
use archivist_rate_limit::{RequestLimiter, Throttle};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default, Clone)]
struct RecordingPacer {
    pauses: Arc<Mutex<Vec<Duration>>>,
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, duration: Duration) {
        self.pauses.lock().unwrap().push(duration);
    }
}

#[tokio::test]
async fn test_no_pause_before_first_call() {
    let pacer = RecordingPacer::default();
    let mut throttle = Throttle::new(pacer.clone(), Duration::from_secs(30));

    assert!(!throttle.wait_turn().await);
    assert!(pacer.pauses.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_n_calls_take_n_minus_one_pauses() {
    let pacer = RecordingPacer::default();
    let mut throttle = Throttle::new(pacer.clone(), Duration::from_secs(30));

    for _ in 0..4 {
        throttle.wait_turn().await;
    }

    assert_eq!(throttle.calls(), 4);
    assert_eq!(throttle.pauses(), 3);
    let pauses = pacer.pauses.lock().unwrap();
    assert_eq!(pauses.len(), 3);
    assert!(pauses.iter().all(|d| *d == Duration::from_secs(30)));
}

#[tokio::test]
async fn test_zero_delay_never_pauses() {
    let pacer = RecordingPacer::default();
    let mut throttle = Throttle::new(pacer.clone(), Duration::ZERO);

    for _ in 0..3 {
        assert!(!throttle.wait_turn().await);
    }
    assert!(pacer.pauses.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_request_limiter_enforces_rpm() {
    let limiter = RequestLimiter::new(Some(2));
    assert!(limiter.try_acquire());
    assert!(limiter.try_acquire());
    assert!(!limiter.try_acquire(), "Third request should be rate limited");
}

#[tokio::test]
async fn test_unlimited_limiter_never_blocks() {
    let limiter = RequestLimiter::unlimited();
    for _ in 0..100 {
        assert!(limiter.try_acquire());
    }
    limiter.acquire().await;
}
