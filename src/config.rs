use std::time::Duration;

#[derive(Debug, Clone)]
pub struct BreakerConfig {
    pub timeout: Duration,
    pub fail_threshold: u32,
    pub retry_threshold: u32,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(3),
            fail_threshold: 5,
            retry_threshold: 5,
        }
    }
}

impl BreakerConfig {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Default::default()
        }
    }

    pub fn with_fail_threshold(mut self, threshold: u32) -> Self {
        self.fail_threshold = threshold;
        self
    }

    pub fn with_retry_threshold(mut self, threshold: u32) -> Self {
        self.retry_threshold = threshold;
        self
    }

    /// Latch preset: deny from the first failure on, and never re-admit on
    /// its own. Recovery requires an explicit `Breaker::reset`.
    pub fn latching(timeout: Duration) -> Self {
        Self {
            timeout,
            fail_threshold: 0,
            retry_threshold: u32::MAX,
        }
    }
}
