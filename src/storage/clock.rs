use chrono::Local;

/// Format of the `added_dt` column
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of the timestamp stamped on persisted rows
pub trait Clock {
    /// Current date-time, formatted as [`DATE_TIME_FORMAT`]
    fn now(&self) -> String;
}

/// Wall clock in the local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        Local::now().format(DATE_TIME_FORMAT).to_string()
    }
}

/// Clock that always reports the same instant
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.0.clone()
    }
}
