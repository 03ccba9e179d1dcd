pub mod breaker;
pub mod config;
pub mod error;
pub mod metrics;

pub use breaker::{Breaker, BreakerState};
pub use config::BreakerConfig;
pub use error::{TripReason, Tripped};
pub use metrics::BreakerMetrics;
