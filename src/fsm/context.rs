//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to.  It contains the latest sensor reading, the actuator outputs,
//! the active thresholds, the change log, and timing.  The service owns it
//! and no other copy exists, so there is no hidden shared mutation.

use chrono::NaiveTime;

use crate::changelog::{ChangeLog, ChangeLogEntry, LogEvent};
use crate::config::ThresholdConfig;

// ---------------------------------------------------------------------------
// Sensor reading (written by the refresh job; read by state handlers)
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of the three greenhouse sensors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    /// LM35 temperature (°C).
    pub temperature: f32,
    /// Raw soil moisture ADC value (0 – 1023).
    pub moisture: u16,
    /// Raw LDR ADC value (0 – 1023).  Higher is darker.
    pub light: u16,
}

impl Default for SensorReading {
    fn default() -> Self {
        Self {
            temperature: 25.0,
            moisture: 450,
            light: 300,
        }
    }
}

// ---------------------------------------------------------------------------
// Actuator outputs
// ---------------------------------------------------------------------------

/// The five actuators of the greenhouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actuator {
    Fan,
    Buzzer,
    Led,
    Valve,
    Servo,
}

impl Actuator {
    pub const ALL: [Actuator; 5] = [
        Actuator::Fan,
        Actuator::Buzzer,
        Actuator::Led,
        Actuator::Valve,
        Actuator::Servo,
    ];
}

impl core::fmt::Display for Actuator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Fan => write!(f, "Fan"),
            Self::Buzzer => write!(f, "Buzzer"),
            Self::Led => write!(f, "LED"),
            Self::Valve => write!(f, "Valve"),
            Self::Servo => write!(f, "Servo"),
        }
    }
}

/// Servo angle when the vent is open.
pub const SERVO_OPEN_DEG: u8 = 90;
/// Servo angle when the vent is closed.
pub const SERVO_CLOSED_DEG: u8 = 0;

/// Desired output of every actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActuatorState {
    pub fan_on: bool,
    pub buzzer_on: bool,
    pub led_on: bool,
    pub valve_on: bool,
    pub servo_open: bool,
}

impl ActuatorState {
    /// Everything off, vent closed.
    pub fn all_off() -> Self {
        Self::default()
    }

    pub fn is_all_off(&self) -> bool {
        *self == Self::all_off()
    }

    pub fn get(&self, actuator: Actuator) -> bool {
        match actuator {
            Actuator::Fan => self.fan_on,
            Actuator::Buzzer => self.buzzer_on,
            Actuator::Led => self.led_on,
            Actuator::Valve => self.valve_on,
            Actuator::Servo => self.servo_open,
        }
    }

    pub fn set(&mut self, actuator: Actuator, on: bool) {
        match actuator {
            Actuator::Fan => self.fan_on = on,
            Actuator::Buzzer => self.buzzer_on = on,
            Actuator::Led => self.led_on = on,
            Actuator::Valve => self.valve_on = on,
            Actuator::Servo => self.servo_open = on,
        }
    }

    /// Flip one output and return its new value.
    pub fn toggle(&mut self, actuator: Actuator) -> bool {
        let on = !self.get(actuator);
        self.set(actuator, on);
        on
    }

    /// Servo angle in degrees for the current vent position.
    pub fn servo_angle(&self) -> u8 {
        if self.servo_open {
            SERVO_OPEN_DEG
        } else {
            SERVO_CLOSED_DEG
        }
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    /// Wall-clock time used to stamp log entries.
    pub now: NaiveTime,

    // -- Inputs --
    /// Latest sensor reading.  Updated by the refresh job.
    pub reading: SensorReading,
    /// Active thresholds.
    pub thresholds: ThresholdConfig,
    /// Set when the control job fired this tick; consumed by the handler.
    pub control_due: bool,

    // -- Outputs --
    pub actuators: ActuatorState,
    pub log: ChangeLog,
}

impl FsmContext {
    pub fn new(thresholds: ThresholdConfig) -> Self {
        Self {
            now: NaiveTime::MIN,
            reading: SensorReading::default(),
            thresholds,
            control_due: false,
            actuators: ActuatorState::all_off(),
            log: ChangeLog::new(),
        }
    }

    /// Append an event to the change log, stamped with `now`.
    pub fn record(&mut self, event: LogEvent) {
        self.log.append(ChangeLogEntry {
            timestamp: self.now,
            event,
        });
    }
}
