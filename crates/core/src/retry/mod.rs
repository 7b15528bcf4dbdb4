//! Throttling-aware retry with exponential backoff and jitter.
//!
//! Used around AWS control-plane calls (Parameter Store, Secrets Manager,
//! DynamoDB) that enforce request-rate limits. Only throttling errors are
//! retried; anything else is returned after the first attempt.

mod classify;
mod policy;

use std::future::Future;

use rand::{rngs::StdRng, SeedableRng};

pub use classify::{is_throttling_error, Throttled, RATE_EXCEEDED_MESSAGE, THROTTLING_ERROR_CODES};
pub use policy::{Backoff, RetryPolicy};

/// Runs `op` and retries it while it fails with a throttling error.
///
/// The operation is invoked at most `policy.max_retries + 1` times. When the
/// budget runs out the last error is returned as-is.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, op: F) -> Result<T, E>
where
    E: Throttled,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    retry_if(policy, |e: &E| e.is_throttled(), op).await
}

/// Like [`retry`], with the retryable classification supplied by the caller.
///
/// This is the entry point for foreign error types such as AWS SDK errors.
pub async fn retry_if<T, E, C, F, Fut>(policy: &RetryPolicy, classify: C, mut op: F) -> Result<T, E>
where
    C: Fn(&E) -> bool,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut backoff = Backoff::new(*policy, StdRng::from_os_rng());

    loop {
        let error = match op().await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        if !classify(&error) {
            return Err(error);
        }

        let Some(delay) = backoff.next_delay() else {
            tracing::warn!(
                attempts = backoff.attempt() + 1,
                "Retry budget exhausted for throttled call"
            );
            return Err(error);
        };

        tracing::warn!(
            attempt = backoff.attempt(),
            max_retries = policy.max_retries,
            wait_ms = delay.as_millis() as u64,
            "Throttled, retrying after backoff"
        );
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    };
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    enum TestError {
        Throttled(u32),
        Fatal(&'static str),
    }

    impl Throttled for TestError {
        fn is_throttled(&self) -> bool {
            matches!(self, TestError::Throttled(_))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_on_first_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<&str, TestError> = retry(&RetryPolicy::default(), || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok("done")
            }
        })
        .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_throttling_error_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), TestError> = retry(&RetryPolicy::default(), || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(TestError::Fatal("access denied"))
            }
        })
        .await;

        assert_eq!(result, Err(TestError::Fatal("access denied")));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_budget_returns_last_error_unchanged() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), TestError> = retry(&RetryPolicy::default(), || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                Err(TestError::Throttled(n))
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 6);
        assert_eq!(result, Err(TestError::Throttled(5)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_throttling() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<u32, TestError> = retry(&RetryPolicy::default(), || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(TestError::Throttled(n))
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_follow_backoff_schedule() {
        let policy = RetryPolicy::default().with_jitter(0.0).with_max_retries(3);
        let start = tokio::time::Instant::now();

        let result: Result<(), TestError> =
            retry(&policy, || async { Err(TestError::Throttled(0)) }).await;

        assert!(result.is_err());
        // 500ms + 1000ms + 2000ms
        assert_eq!(start.elapsed(), Duration::from_millis(3500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_total_wait_is_bounded_with_jitter() {
        let policy = RetryPolicy::default();
        let start = tokio::time::Instant::now();

        let _: Result<(), TestError> =
            retry(&policy, || async { Err(TestError::Throttled(0)) }).await;

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(12_500));
        assert!(elapsed <= policy.delay_ceiling() * 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_if_uses_caller_classification() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let policy = RetryPolicy::default().with_max_retries(2);

        let result: Result<(), String> = retry_if(
            &policy,
            |e: &String| is_throttling_error(None, Some(e)),
            || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err("Rate exceeded".to_string())
                }
            },
        )
        .await;

        assert_eq!(result, Err("Rate exceeded".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
