#[derive(Debug, Clone)]
pub struct BreakerMetrics {
    pub fail_count: u32,
    pub retry_count: u32,
    pub state: String,
}
