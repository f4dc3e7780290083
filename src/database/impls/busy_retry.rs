use std::thread;
use std::time::Duration;
use rusqlite::ErrorCode;
use crate::database::structs::busy_retry::BusyRetry;

impl BusyRetry {
    pub const INTERVAL: Duration = Duration::from_millis(100);

    /// One retry per 100 ms of `timeout_ms`.
    pub fn from_timeout(timeout_ms: u64) -> BusyRetry {
        BusyRetry {
            attempts: u32::try_from(timeout_ms / Self::INTERVAL.as_millis() as u64).unwrap_or(u32::MAX),
            interval: Self::INTERVAL,
        }
    }

    /// Runs `operation`, repeating it while SQLite reports the file busy or
    /// locked and retries remain.
    pub fn run<T, F>(&self, operation: F) -> rusqlite::Result<T>
    where
        F: FnMut() -> rusqlite::Result<T>,
    {
        self.run_with(operation, Self::is_busy, thread::sleep)
    }

    /// [`BusyRetry::run`] with the retry predicate and the sleep supplied by
    /// the caller.
    pub fn run_with<T, E, F, P, S>(&self, mut operation: F, retryable: P, mut sleep: S) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
        P: Fn(&E) -> bool,
        S: FnMut(Duration),
    {
        let mut retry = 0u32;
        loop {
            match operation() {
                Err(error) if retryable(&error) && retry < self.attempts => {
                    retry += 1;
                    sleep(self.interval);
                }
                result => return result,
            }
        }
    }

    pub fn is_busy(error: &rusqlite::Error) -> bool {
        matches!(error.sqlite_error_code(), Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked))
    }
}

impl Default for BusyRetry {
    fn default() -> Self {
        BusyRetry {
            attempts: 0,
            interval: Self::INTERVAL,
        }
    }
}
