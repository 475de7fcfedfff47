//! Async request pacing shared by all client operations.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::config::DEFAULT_COOLDOWN_MS;

/// Enforces a minimum cooldown interval between consecutive API requests.
///
/// Cloned handles share the same pacing state, so a client and the app
/// layer can hold independent copies of one limiter.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    cooldown: Duration,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Sleeps out the remainder of the cooldown window, then records the
    /// current instant as the latest request time.
    pub async fn hit(&self) {
        let mut guard = self.last_request.lock().await;
        if let Some(last) = *guard {
            let elapsed = last.elapsed();
            if elapsed < self.cooldown {
                sleep(self.cooldown - elapsed).await;
            }
        }
        *guard = Some(Instant::now());
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_COOLDOWN_MS))
    }
}
