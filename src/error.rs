use std::fmt;

use thiserror::Error;

/// Why a guarded call tripped. Informational only; every reason is the same
/// `Tripped` error at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripReason {
    Rejected,
    Failed,
    TimedOut,
}

impl fmt::Display for TripReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripReason::Rejected => write!(f, "rejected without attempting the call"),
            TripReason::Failed => write!(f, "call failed"),
            TripReason::TimedOut => write!(f, "call timed out"),
        }
    }
}

#[derive(Debug, Error)]
#[error("breaker tripped: {reason}")]
pub struct Tripped {
    reason: TripReason,
}

impl Tripped {
    pub(crate) fn new(reason: TripReason) -> Self {
        Self { reason }
    }

    pub fn reason(&self) -> TripReason {
        self.reason
    }
}
