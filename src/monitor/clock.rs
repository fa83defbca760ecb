//! Wall-clock timestamps for alerts

use chrono::Local;

use crate::types::alert::TIMESTAMP_FORMAT;

/// Source of alert timestamps (`YYYY-MM-DD HH:MM:SS`)
pub trait Clock {
    fn timestamp(&self) -> String;
}

/// Local wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> String {
        Local::now().format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Always returns the same timestamp
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn timestamp(&self) -> String {
        self.0.clone()
    }
}
