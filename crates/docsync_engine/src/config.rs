//! Configuration for the sync engine.

use std::time::Duration;

/// Configuration for a document sync session.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Retry configuration for the conflict loop.
    pub retry: RetryConfig,
}

impl EngineConfig {
    /// Creates a configuration with the default retry behavior.
    pub fn new() -> Self {
        Self {
            retry: RetryConfig::default(),
        }
    }

    /// Sets the retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Bounded exponential backoff for the merge-and-resubmit loop.
///
/// The server gives no backoff guidance; pacing conflict retries is
/// entirely the client's job.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of submit attempts per publish.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_delay: Duration,
    /// Ceiling on the delay between attempts.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each conflict.
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    /// Creates a retry configuration with the given attempt budget.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }

    /// Creates a configuration that gives up after the first conflict.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
        }
    }

    /// Sets the initial delay.
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the maximum delay.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Calculates the delay before the given attempt (0-indexed).
    ///
    /// The first attempt runs immediately; each later attempt waits the
    /// previous delay scaled by the multiplier, capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let scaled = self.initial_delay.as_secs_f64()
            * self.backoff_multiplier.powi(attempt.saturating_sub(1) as i32);
        Duration::from_secs_f64(scaled.min(self.max_delay.as_secs_f64()))
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_config_builder() {
        let config = EngineConfig::new().with_retry(RetryConfig::no_retry());
        assert_eq!(config.retry.max_attempts, 1);
    }

    #[test]
    fn delay_grows_exponentially() {
        let retry = RetryConfig::new(5).with_initial_delay(Duration::from_millis(100));

        assert_eq!(retry.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(retry.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(retry.delay_for_attempt(2), Duration::from_millis(200));
        assert_eq!(retry.delay_for_attempt(3), Duration::from_millis(400));
    }

    #[test]
    fn delay_respects_ceiling() {
        let retry = RetryConfig::new(10)
            .with_initial_delay(Duration::from_secs(1))
            .with_max_delay(Duration::from_secs(4));

        assert_eq!(retry.delay_for_attempt(8), Duration::from_secs(4));
    }
}
