//! Unified error types for the greenhouse controller.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! command surface of [`AppService`](crate::app::service::AppService)
//! uniform.  All variants are `Copy` so they travel through events and the
//! change log without allocation.

use core::fmt;

use crate::fsm::context::Actuator;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the controller funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// A proposed configuration was rejected.
    Config(ConfigError),
    /// A manual toggle arrived while automatic mode owns the outputs.
    ManualOnly(Actuator),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::ManualOnly(a) => {
                write!(f, "{a} can only be toggled in manual mode")
            }
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Identifies one of the five configurable thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThresholdField {
    TempNormal,
    TempFan,
    TempAlarm,
    Moisture,
    Light,
}

impl fmt::Display for ThresholdField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TempNormal => write!(f, "temp_normal"),
            Self::TempFan => write!(f, "temp_fan"),
            Self::TempAlarm => write!(f, "temp_alarm"),
            Self::Moisture => write!(f, "moisture_threshold"),
            Self::Light => write!(f, "light_threshold"),
        }
    }
}

/// Reasons a configuration candidate is refused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// `temp_normal < temp_fan < temp_alarm` does not hold.
    /// Names the first violated pair, checked from the bottom up.
    InvalidOrdering {
        lower: ThresholdField,
        lower_value: f32,
        upper: ThresholdField,
        upper_value: f32,
    },
    /// A scheduler interval was configured as zero.
    ZeroInterval(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOrdering {
                lower,
                lower_value,
                upper,
                upper_value,
            } => write!(
                f,
                "invalid ordering: {lower} ({lower_value:.1}) must be below {upper} ({upper_value:.1})"
            ),
            Self::ZeroInterval(name) => write!(f, "interval {name} must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
