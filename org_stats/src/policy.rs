use derive_more::Constructor;
use rand::Rng;
use std::time::Duration;

/// How long to wait for the upstream to finish computing repository stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor)]
pub struct RetryPolicy {
    /// Pause between two requests for stats which are not ready yet.
    pub backoff: Duration,
    /// Requests per repository before giving up, `None` polls forever.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::new(Duration::from_secs(5), Some(60))
    }
}

impl RetryPolicy {
    pub fn unbounded(backoff: Duration) -> Self {
        RetryPolicy::new(backoff, None)
    }

    /// `attempt` is 1-based: the number of requests issued so far.
    pub fn exhausted(&self, attempt: u32) -> bool {
        self.max_attempts.map_or(false, |max| attempt >= max)
    }
}

/// Randomized pause before the first stats request of every repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor)]
pub struct JitterPolicy {
    /// Upper bound in whole seconds, inclusive.
    pub max_secs: u64,
}

impl Default for JitterPolicy {
    fn default() -> Self {
        JitterPolicy::new(4)
    }
}

impl JitterPolicy {
    pub fn none() -> Self {
        JitterPolicy::new(0)
    }

    pub fn delay(&self) -> Duration {
        if self.max_secs == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs(rand::thread_rng().gen_range(0..=self.max_secs))
    }
}

#[test]
fn bounded_retry_policy_exhausts() {
    let policy = RetryPolicy::new(Duration::ZERO, Some(3));
    assert!(!policy.exhausted(1));
    assert!(!policy.exhausted(2));
    assert!(policy.exhausted(3));
}

#[test]
fn unbounded_retry_policy_never_exhausts() {
    let policy = RetryPolicy::unbounded(Duration::ZERO);
    assert!(!policy.exhausted(u32::MAX));
}

#[test]
fn jitter_stays_in_bounds() {
    let policy = JitterPolicy::default();
    for _ in 0..100 {
        assert!(policy.delay() <= Duration::from_secs(4));
    }
    assert_eq!(JitterPolicy::none().delay(), Duration::ZERO);
}
