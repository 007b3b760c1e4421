use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Terminal outcome of a retry run
#[derive(Debug, thiserror::Error)]
pub enum RetryError<E>
where
    E: std::error::Error + 'static,
{
    #[error("all {attempts} attempts failed: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: E,
    },

    #[error("non-retryable failure: {0}")]
    Fatal(#[source] E),

    #[error("cancelled before completion")]
    Cancelled,
}

/// Bounded retry policy with a linear backoff curve
///
/// The delay after attempt `n` is `base_delay * n`, so the defaults
/// (3 attempts, 2 s base) sleep 2 s and then 4 s between attempts.
/// The curve is linear, not exponential.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    pub fn linear(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Backoff applied after a failed attempt
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }

    /// Drive `op(attempt)` for attempts 1..=max_attempts.
    ///
    /// `retryable` decides per error whether the next attempt runs (after
    /// this attempt's backoff delay) or the loop aborts at once.
    /// Cancellation is honored before each attempt and during each backoff
    /// sleep, so an abandoned request stops consuming retry budget.
    pub async fn run<T, E, F, Fut>(
        &self,
        cancel: &CancellationToken,
        retryable: impl Fn(&E) -> bool,
        mut op: F,
    ) -> Result<T, RetryError<E>>
    where
        E: std::error::Error + 'static,
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 1;
        loop {
            if cancel.is_cancelled() {
                return Err(RetryError::Cancelled);
            }

            let result = tokio::select! {
                _ = cancel.cancelled() => return Err(RetryError::Cancelled),
                result = op(attempt) => result,
            };

            let err = match result {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if !retryable(&err) {
                return Err(RetryError::Fatal(err));
            }
            if attempt >= self.max_attempts {
                return Err(RetryError::Exhausted {
                    attempts: attempt,
                    source: err,
                });
            }

            tracing::warn!(attempt, error = %err, "attempt failed, retrying");

            tokio::select! {
                _ = cancel.cancelled() => return Err(RetryError::Cancelled),
                _ = tokio::time::sleep(self.delay_for(attempt)) => {}
            }
            attempt += 1;
        }
    }
}
