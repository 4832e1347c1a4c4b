//! Wall-clock adapter.
//!
//! Provides local time-of-day for change-log timestamps via
//! `chrono::Local`.

use chrono::{Local, NaiveTime, Timelike};

use crate::app::ports::ClockPort;

/// Clock backed by the host's local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for SystemClock {
    /// Local time truncated to whole seconds.
    fn now(&self) -> NaiveTime {
        let t = Local::now().time();
        t.with_nanosecond(0).unwrap_or(t)
    }
}
