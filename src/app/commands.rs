//! Inbound commands to the application service.
//!
//! These represent operator actions from the display layer that the
//! [`AppService`](super::service::AppService) interprets and acts upon.

use crate::config::ThresholdConfig;
use crate::fsm::context::Actuator;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppCommand {
    /// Enter automatic mode.  First evaluation follows one control interval later.
    StartAutomatic,

    /// Leave automatic mode; every output is forced off.
    StopAutomatic,

    /// Replace the active thresholds if the ordering holds.
    ApplyThresholds(ThresholdConfig),

    /// Empty the change log.
    ClearLog,

    /// Flip one actuator.  Manual mode only.
    Toggle(Actuator),
}
