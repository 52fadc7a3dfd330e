use chrono::{Local, NaiveDateTime, Timelike};

/// Clock abstracts access to the current time so the store stays deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    /// Current time truncated to whole seconds, the precision entries are stored with.
    fn now_seconds(&self) -> NaiveDateTime {
        let now = self.now();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Real-time clock backed by the system local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
