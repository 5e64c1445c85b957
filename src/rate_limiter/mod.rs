use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Keeps consecutive requests at least `delay` apart
pub struct RateLimiter {
    delay: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            last_request: None,
        }
    }

    pub async fn wait(&mut self) {
        if let Some(earliest) = self.next_allowed() {
            sleep_until(earliest).await;
        }
        self.last_request = Some(Instant::now());
    }

    fn next_allowed(&self) -> Option<Instant> {
        self.last_request.map(|last| last + self.delay)
    }
}
