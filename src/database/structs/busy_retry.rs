use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyRetry {
    /// Retries after the first attempt.
    pub attempts: u32,
    pub interval: Duration,
}
