//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log lines, a status panel, a test
//! recorder.

use crate::changelog::ChangeLogEntry;
use crate::error::ConfigError;
use crate::fsm::Mode;
use crate::fsm::context::{ActuatorState, SensorReading};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The application service has started (carries initial mode).
    Started(Mode),

    /// The operating mode changed.
    ModeChanged { from: Mode, to: Mode },

    /// A new change-log entry was appended.
    Logged(ChangeLogEntry),

    /// A threshold candidate was refused; the previous set stays active.
    ThresholdsRejected(ConfigError),

    /// The change log was emptied.
    LogCleared,

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging or display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryData {
    pub mode: Mode,
    pub reading: SensorReading,
    /// Moisture as 0–100 % (dry sensor reads high).
    pub moisture_percent: u8,
    pub actuators: ActuatorState,
    pub log_len: usize,
}
