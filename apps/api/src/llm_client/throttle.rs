//! Minimum spacing between outbound completion calls.
//!
//! One shared timestamp. A caller that arrives too soon sleeps for the remainder
//! while holding the lock, so concurrent callers go out one interval apart.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

#[derive(Clone)]
pub struct Throttle {
    min_interval: Duration,
    last_call: Arc<Mutex<Option<Instant>>>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Arc::new(Mutex::new(None)),
        }
    }

    /// Waits until at least `min_interval` has passed since the previous call,
    /// then records now as the latest call.
    pub async fn wait(&self) {
        let mut last = self.last_call.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                let delay = self.min_interval - elapsed;
                debug!("Throttling LLM call for {}ms", delay.as_millis());
                tokio::time::sleep(delay).await;
            }
        }
        *last = Some(Instant::now());
    }
}
