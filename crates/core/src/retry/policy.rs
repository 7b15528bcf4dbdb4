use std::time::Duration;

use rand::Rng;

/// Retry budget and backoff shape for throttled calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt. Total attempts are `max_retries + 1`.
    pub max_retries: u32,
    /// Wait before the first retry.
    pub initial_delay: Duration,
    /// Upper bound of the base delay, before jitter.
    pub max_delay: Duration,
    /// Jitter as a fraction of the base delay, in `[0, 1]`.
    pub jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
            jitter: 0.25,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.clamp(0.0, 1.0);
        self
    }

    /// Base delay for the retry at `attempt` (0-based): `initial * 2^attempt`,
    /// capped at `max_delay`.
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |d| d.min(self.max_delay))
    }

    /// Largest delay this policy can ever produce.
    pub fn delay_ceiling(&self) -> Duration {
        self.max_delay.mul_f64(1.0 + self.jitter)
    }
}

/// Stateful delay generator for one retried call.
///
/// Delays never decrease: once the base delay is capped, a jittered value
/// lower than the previous wait is raised to it.
#[derive(Debug)]
pub struct Backoff<R> {
    policy: RetryPolicy,
    attempt: u32,
    previous: Duration,
    rng: R,
}

impl<R: Rng> Backoff<R> {
    pub fn new(policy: RetryPolicy, rng: R) -> Self {
        Self {
            policy,
            attempt: 0,
            previous: Duration::ZERO,
            rng,
        }
    }

    /// Retries already handed out.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Delay before the next retry, or `None` once the budget is spent.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.attempt >= self.policy.max_retries {
            return None;
        }

        let base = self.policy.base_delay(self.attempt);
        let jitter = if self.policy.jitter > 0.0 {
            base.mul_f64(self.rng.random_range(0.0..=self.policy.jitter))
        } else {
            Duration::ZERO
        };

        let delay = (base + jitter).max(self.previous);
        self.previous = delay;
        self.attempt += 1;
        Some(delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.initial_delay, Duration::from_millis(500));
        assert_eq!(policy.max_delay, Duration::from_secs(5));
        assert_eq!(policy.jitter, 0.25);
    }

    #[test]
    fn test_base_delay_doubles_until_capped() {
        let policy = RetryPolicy::default();
        let delays: Vec<u128> = (0..6).map(|n| policy.base_delay(n).as_millis()).collect();
        assert_eq!(delays, vec![500, 1000, 2000, 4000, 5000, 5000]);
    }

    #[test]
    fn test_base_delay_large_attempt_does_not_overflow() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.base_delay(64), Duration::from_secs(5));
    }

    #[test]
    fn test_backoff_respects_budget() {
        let policy = RetryPolicy::default().with_max_retries(3);
        let mut backoff = Backoff::new(policy, StdRng::seed_from_u64(7));

        assert!(backoff.next_delay().is_some());
        assert!(backoff.next_delay().is_some());
        assert!(backoff.next_delay().is_some());
        assert!(backoff.next_delay().is_none());
        assert_eq!(backoff.attempt(), 3);
    }

    #[test]
    fn test_backoff_without_jitter_is_exact() {
        let policy = RetryPolicy::default().with_jitter(0.0);
        let mut backoff = Backoff::new(policy, StdRng::seed_from_u64(1));

        let delays: Vec<u128> = std::iter::from_fn(|| backoff.next_delay())
            .map(|d| d.as_millis())
            .collect();
        assert_eq!(delays, vec![500, 1000, 2000, 4000, 5000]);
    }

    #[test]
    fn test_delays_non_decreasing_and_bounded() {
        for seed in 0..200 {
            let policy = RetryPolicy::default().with_max_retries(12);
            let mut backoff = Backoff::new(policy, StdRng::seed_from_u64(seed));
            let delays: Vec<Duration> = std::iter::from_fn(|| backoff.next_delay()).collect();

            assert_eq!(delays.len(), 12);
            for pair in delays.windows(2) {
                assert!(pair[0] <= pair[1], "seed {seed}: {delays:?}");
            }
            for delay in &delays {
                assert!(*delay <= policy.delay_ceiling(), "seed {seed}: {delay:?}");
            }
        }
    }

    #[test]
    fn test_jitter_is_clamped() {
        let policy = RetryPolicy::default().with_jitter(3.0);
        assert_eq!(policy.jitter, 1.0);
    }

    #[test]
    fn test_no_retry_policy() {
        let mut backoff = Backoff::new(RetryPolicy::no_retry(), StdRng::seed_from_u64(0));
        assert!(backoff.next_delay().is_none());
    }
}
