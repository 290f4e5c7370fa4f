//! Fixed-interval rate gate.
//!
//! One gate is shared by every outbound request of a client instance. A
//! request may only start once `interval` has passed since the previous one
//! started, regardless of symbol or operation.

use std::time::Duration;

use log::debug;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// Serializes the start of outbound requests.
pub struct RateGate {
    interval: Duration,
    /// Start time of the most recent outbound request.
    last_request: Mutex<Option<Instant>>,
}

impl RateGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: Mutex::new(None),
        }
    }

    /// Wait until a request may start, then record it as started.
    ///
    /// The lock is held across the wait so concurrent callers queue behind
    /// each other instead of all waking at the same instant.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.interval {
                let wait_time = self.interval - elapsed;
                debug!("Rate gate: waiting {:?} before next request", wait_time);
                sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_first_acquire_is_immediate() {
        let gate = RateGate::new(Duration::from_secs(12));
        let start = Instant::now();
        gate.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_acquire_spaces_requests() {
        let gate = RateGate::new(Duration::from_secs(12));
        let start = Instant::now();

        gate.acquire().await;
        gate.acquire().await;
        assert!(start.elapsed() >= Duration::from_secs(12));

        gate.acquire().await;
        assert!(start.elapsed() >= Duration::from_secs(24));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_after_interval_passed() {
        let gate = RateGate::new(Duration::from_secs(12));
        gate.acquire().await;

        tokio::time::advance(Duration::from_secs(20)).await;
        let start = Instant::now();
        gate.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_are_serialized() {
        let gate = Arc::new(RateGate::new(Duration::from_secs(5)));
        let mut handles = Vec::new();

        for _ in 0..3 {
            let gate = gate.clone();
            handles.push(tokio::spawn(async move {
                gate.acquire().await;
                Instant::now()
            }));
        }

        let mut starts = Vec::new();
        for handle in handles {
            starts.push(handle.await.unwrap());
        }
        starts.sort();

        for pair in starts.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_secs(5));
        }
    }
}
