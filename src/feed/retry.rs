//! Bounded linear backoff for upstream fetches

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

/// Retry policy for a single fetch cycle: up to `max_attempts` tries with a
/// linearly growing pause between them (base, 2x base, ...). Feeds poll on
/// short intervals anyway, so anything fancier than linear just delays the
/// next scheduled cycle.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_delay_ms: u64,
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, base_delay_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay_ms,
        }
    }

    fn next_delay(&self, failures: usize) -> Duration {
        Duration::from_millis(self.base_delay_ms.saturating_mul(failures as u64))
    }

    /// Run `op` until it succeeds or the attempt budget is spent, returning
    /// the last error in that case. The closure receives the zero-based
    /// attempt number.
    pub async fn run<F, Fut, T, E>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut(usize) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 0;
        loop {
            match op(attempt).await {
                Ok(val) => return Ok(val),
                Err(err) => {
                    attempt += 1;
                    if attempt >= self.max_attempts {
                        return Err(err);
                    }
                    sleep(self.next_delay(attempt)).await;
                }
            }
        }
    }
}
