//! Bounded retry over an async operation.
//!
//! The classifier decides which errors are worth another attempt; the first
//! fatal error short-circuits, and the last error comes back when the
//! attempt budget runs out.

use std::{future::Future, time::Duration};

use log::warn;

/// Attempts per push before giving up.
pub const MAX_PUSH_ATTEMPTS: usize = 3;

/// Flat delay between attempts. Deliberately not jittered so test runs stay
/// reproducible.
pub const RETRY_DELAY: Duration = Duration::from_millis(500);

pub async fn retry<T, E, F, Fut, C>(
    max_attempts: usize,
    delay: Duration,
    mut operation: F,
    is_retryable: C,
) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: Fn(&E) -> bool,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                if attempt >= max_attempts || !is_retryable(&error) {
                    return Err(error);
                }
                warn!(
                    "attempt {}/{} failed, retrying in {:?}: {}",
                    attempt, max_attempts, delay, error
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
