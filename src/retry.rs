use std::future::Future;
use std::time::Duration;

use tracing::trace;

/// Retry count used by [`retry`].
pub const DEFAULT_RETRIES: usize = 3;

/// Runs `operation` with the [default](DEFAULT_RETRIES) number of retries and
/// no delay between attempts. See [`retrying`].
pub async fn retry<T, E, Fut>(operation: impl FnMut() -> Fut) -> Result<T, E>
where
    Fut: Future<Output = Result<T, E>>,
{
    retrying(DEFAULT_RETRIES, None, operation).await
}

/// Runs a fallible async operation, retrying it on failure.
///
/// The operation is attempted up to `retries + 1` times: `retries` attempts
/// whose errors are swallowed, then one final attempt whose result is returned
/// as-is. When `delay` is given, it elapses after every failed attempt before
/// the next one begins. The first `Ok` returns immediately.
///
/// Cancellation is the usual future drop; a retry loop parked in its delay is
/// abandoned along with the future.
pub async fn retrying<T, E, Fut>(
    retries: usize,
    delay: Option<Duration>,
    mut operation: impl FnMut() -> Fut,
) -> Result<T, E>
where
    Fut: Future<Output = Result<T, E>>,
{
    for attempt in 0..retries {
        if let Ok(value) = operation().await {
            return Ok(value);
        }
        trace!(attempt, "attempt failed, retrying");
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
    operation().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    type Attempt = std::future::Ready<Result<u32, &'static str>>;

    fn failing_until(successful_attempt: usize) -> (Arc<AtomicUsize>, impl FnMut() -> Attempt) {
        let attempts = Arc::new(AtomicUsize::new(0));
        let operation = {
            let attempts = attempts.clone();
            move || {
                let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                std::future::ready(if n < successful_attempt { Err("unavailable") } else { Ok(42) })
            }
        };
        (attempts, operation)
    }

    #[tokio::test]
    async fn returns_the_first_success() {
        let (attempts, operation) = failing_until(2);
        assert_eq!(retrying(3, None, operation).await, Ok(42));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn succeeds_without_retrying_when_the_first_attempt_works() {
        let (attempts, operation) = failing_until(1);
        assert_eq!(retrying(3, None, operation).await, Ok(42));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhausted_retries_return_the_final_error() {
        let (attempts, operation) = failing_until(usize::MAX);
        assert_eq!(retrying(2, None, operation).await, Err::<u32, _>("unavailable"));
        // Two swallowed attempts plus the final one.
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn default_retry_allows_four_attempts() {
        let (attempts, operation) = failing_until(4);
        assert_eq!(retry(operation).await, Ok(42));
        assert_eq!(attempts.load(Ordering::SeqCst), DEFAULT_RETRIES + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn delay_elapses_between_attempts() {
        let started = tokio::time::Instant::now();
        let (attempts, operation) = failing_until(usize::MAX);

        let result = retrying(2, Some(Duration::from_millis(100)), operation).await;
        assert_eq!(result, Err::<u32, _>("unavailable"));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        // One delay after each swallowed failure, none after the final attempt.
        assert_eq!(started.elapsed(), Duration::from_millis(200));
    }
}
