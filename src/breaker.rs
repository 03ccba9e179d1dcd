use std::fmt;
use std::future::Future;

use tokio::sync::{oneshot, Mutex};

use crate::config::BreakerConfig;
use crate::error::{TripReason, Tripped};
use crate::metrics::BreakerMetrics;

/// Derived view of the breaker: whether the next call would be admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    Allowed,
    Denied,
}

struct Counters {
    fail_count: u32,
    retry_count: u32,
}

pub struct Breaker {
    config: BreakerConfig,
    counters: Mutex<Counters>,
}

impl Breaker {
    pub fn new(config: BreakerConfig) -> Self {
        Self {
            config,
            counters: Mutex::new(Counters {
                fail_count: 0,
                retry_count: 0,
            }),
        }
    }

    /// Breaker with the latch policy: denies from the first failure until
    /// `reset` is called.
    pub fn latching(timeout: std::time::Duration) -> Self {
        Self::new(BreakerConfig::latching(timeout))
    }

    /// Runs `operation` under the breaker, racing it against the configured
    /// timeout. On success both counters reset and the operation's value is
    /// returned. On denial, failure, or timeout the counters increment,
    /// `on_tripped` runs exactly once, and `Tripped` is returned. A call that
    /// times out is abandoned: it keeps running detached and its eventual
    /// result is discarded.
    pub async fn guard<F, Fut, T, E, G>(&self, operation: F, on_tripped: G) -> Result<T, Tripped>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: fmt::Display + Send + 'static,
        G: FnOnce(),
    {
        if !self.admit().await {
            self.record_trip(TripReason::Rejected).await;
            on_tripped();
            return Err(Tripped::new(TripReason::Rejected));
        }

        let (tx, rx) = oneshot::channel();
        let fut = operation();
        tokio::spawn(async move {
            // A late send after the timeout fails against the dropped
            // receiver and the result is discarded.
            let _ = tx.send(fut.await);
        });

        let reason = tokio::select! {
            res = rx => match res {
                Ok(Ok(value)) => {
                    self.record_success().await;
                    return Ok(value);
                }
                Ok(Err(e)) => {
                    tracing::warn!("guarded call failed: {}", e);
                    TripReason::Failed
                }
                // Sender dropped without a send: the operation panicked.
                Err(_) => TripReason::Failed,
            },
            _ = tokio::time::sleep(self.config.timeout) => TripReason::TimedOut,
        };

        self.record_trip(reason).await;
        on_tripped();
        Err(Tripped::new(reason))
    }

    /// Whether the next call would be admitted. Pure inspection; unlike the
    /// internal admit decision it never consumes a due probe.
    pub async fn state(&self) -> BreakerState {
        let counters = self.counters.lock().await;
        self.derive_state(&counters)
    }

    pub async fn metrics(&self) -> BreakerMetrics {
        let counters = self.counters.lock().await;
        BreakerMetrics {
            fail_count: counters.fail_count,
            retry_count: counters.retry_count,
            state: format!("{:?}", self.derive_state(&counters)),
        }
    }

    /// Zeroes both counters, as a successful call would.
    pub async fn reset(&self) {
        let mut counters = self.counters.lock().await;
        counters.fail_count = 0;
        counters.retry_count = 0;
    }

    async fn admit(&self) -> bool {
        let mut counters = self.counters.lock().await;
        // The probe check runs before the failure check; the reset here is
        // the only path that re-admits a tripped breaker.
        if counters.retry_count > self.config.retry_threshold {
            counters.retry_count = 0;
            tracing::debug!(fail_count = counters.fail_count, "probe admitted");
            return true;
        }
        counters.fail_count <= self.config.fail_threshold
    }

    async fn record_success(&self) {
        let mut counters = self.counters.lock().await;
        counters.fail_count = 0;
        counters.retry_count = 0;
        tracing::debug!("guarded call succeeded, counters reset");
    }

    async fn record_trip(&self, reason: TripReason) {
        let mut counters = self.counters.lock().await;
        counters.fail_count = counters.fail_count.saturating_add(1);
        counters.retry_count = counters.retry_count.saturating_add(1);
        tracing::warn!(
            fail_count = counters.fail_count,
            retry_count = counters.retry_count,
            reason = %reason,
            "breaker tripped"
        );
    }

    fn derive_state(&self, counters: &Counters) -> BreakerState {
        if counters.retry_count > self.config.retry_threshold
            || counters.fail_count <= self.config.fail_threshold
        {
            BreakerState::Allowed
        } else {
            BreakerState::Denied
        }
    }
}
