//! Append-only change log.
//!
//! Every actuator transition, mode change and threshold update lands here as
//! a timestamped [`ChangeLogEntry`].  Growth is unbounded; the display side
//! decides how much of the tail to show.

use core::fmt;

use chrono::NaiveTime;

use crate::config::ThresholdConfig;
use crate::control::engine::Transition;
use crate::fsm::context::Actuator;

/// What happened.  The human-readable message is this type's `Display`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogEvent {
    /// The control engine switched an actuator.
    Actuator(Transition),
    /// An operator flipped an actuator in manual mode.
    ManualToggle { actuator: Actuator, on: bool },
    AutomaticStarted,
    /// Automatic mode ended and every output was forced off.
    AutomaticStopped,
    ThresholdsApplied(ThresholdConfig),
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actuator(t) => write!(f, "{t}"),
            Self::ManualToggle { actuator, on } => write!(
                f,
                "{actuator} switched {} manually",
                if *on { "ON" } else { "OFF" }
            ),
            Self::AutomaticStarted => {
                write!(f, "Automatic mode started: actuators follow the thresholds")
            }
            Self::AutomaticStopped => {
                write!(f, "Automatic mode stopped: all actuators switched off")
            }
            Self::ThresholdsApplied(c) => write!(
                f,
                "Thresholds updated: temp(\u{2264}{:.1}\u{b0}C | >{:.1}\u{b0}C | >{:.1}\u{b0}C), \
                 moisture(\u{2265}{}), light(\u{2265}{})",
                c.temp_normal, c.temp_fan, c.temp_alarm, c.moisture_threshold, c.light_threshold
            ),
        }
    }
}

/// One line of the change log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeLogEntry {
    pub timestamp: NaiveTime,
    pub event: LogEvent,
}

impl ChangeLogEntry {
    pub fn message(&self) -> String {
        self.event.to_string()
    }
}

impl fmt::Display for ChangeLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format("%H:%M:%S"), self.event)
    }
}

/// Ordered, insertion-order sequence of entries.
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    entries: Vec<ChangeLogEntry>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: ChangeLogEntry) {
        self.entries.push(entry);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ChangeLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&ChangeLogEntry> {
        self.entries.last()
    }
}
