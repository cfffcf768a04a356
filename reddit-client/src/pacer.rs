use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// Floor between consecutive requests to the content source.
pub const MIN_REQUEST_SPACING: Duration = Duration::from_millis(3000);

/// Serializes outbound requests by enforcing a minimum spacing between
/// consecutive calls. The shared last-call instant lives here, behind an
/// explicit struct rather than a process global, so a second independent
/// pacer can exist in the same process if ever needed.
#[derive(Debug)]
pub struct RequestPacer {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RequestPacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    /// Suspends the caller until the spacing floor has elapsed since the
    /// previous call, then stamps the last-call instant. Holding the lock
    /// across the sleep keeps callers strictly sequential.
    pub async fn wait_for_slot(&self) {
        let mut last = self.last_call.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                let remaining = self.min_interval - elapsed;
                tracing::debug!("Pacing request, sleeping {:?}", remaining);
                sleep(remaining).await;
            }
        }
        *last = Some(Instant::now());
    }
}

impl Default for RequestPacer {
    fn default() -> Self {
        Self::new(MIN_REQUEST_SPACING)
    }
}
