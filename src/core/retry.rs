// ─── Bounded retry ───
// Every registry call and download goes through `RetryPolicy::run`. The
// operation classifies its own outcome; only transient failures are retried.

use std::future::Future;

use tracing::warn;

use crate::core::error::{FetchError, FetchResult};

/// Outcome of a single attempt.
#[derive(Debug)]
pub enum Attempt<T> {
    Success(T),
    /// Worth another try: connection reset, timeout, truncated body.
    Transient(FetchError),
    /// Retrying won't help: HTTP error status, integrity failure.
    Hard(FetchError),
}

impl<T> From<FetchResult<T>> for Attempt<T> {
    fn from(result: FetchResult<T>) -> Self {
        match result {
            Ok(value) => Attempt::Success(value),
            Err(e) if e.is_transient() => Attempt::Transient(e),
            Err(e) => Attempt::Hard(e),
        }
    }
}

/// Fixed number of attempts, no delay between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl RetryPolicy {
    pub const DEFAULT_ATTEMPTS: u32 = 3;

    /// At least one attempt is always made.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `op` until it succeeds, fails hard, or attempts run out.
    ///
    /// `op` receives the 1-based attempt number. `what` names the operation
    /// in retry warnings.
    pub async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> FetchResult<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Attempt<T>>,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Attempt::Success(value) => return Ok(value),
                Attempt::Hard(e) => return Err(e),
                Attempt::Transient(e) if attempt < self.max_attempts => {
                    warn!(
                        "{} failed ({}), retrying ({}/{})",
                        what, e, attempt, self.max_attempts
                    );
                    attempt += 1;
                }
                Attempt::Transient(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ATTEMPTS)
    }
}
