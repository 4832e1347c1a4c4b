//! Simulated greenhouse. Bridges the random-walk environment and a set
//! of in-memory outputs to the domain port traits.
//!
//! Used by the host binary in place of real probes and relays.  Output
//! changes are logged at debug level so a run can be followed with
//! `RUST_LOG=debug`.

use log::debug;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::fsm::context::{Actuator, ActuatorState, SERVO_CLOSED_DEG, SERVO_OPEN_DEG, SensorReading};
use crate::sensors::SensorSimulator;

/// Concrete adapter combining the simulator and virtual outputs.
pub struct SimulatedGreenhouse {
    sensors: SensorSimulator,
    outputs: ActuatorState,
    servo_angle: u8,
}

impl SimulatedGreenhouse {
    pub fn new(sensors: SensorSimulator) -> Self {
        Self {
            sensors,
            outputs: ActuatorState::all_off(),
            servo_angle: SERVO_CLOSED_DEG,
        }
    }

    /// Output state as last driven through [`ActuatorPort`].
    pub fn outputs(&self) -> ActuatorState {
        self.outputs
    }

    pub fn servo_angle(&self) -> u8 {
        self.servo_angle
    }

    fn drive(&mut self, actuator: Actuator, on: bool) {
        if self.outputs.get(actuator) != on {
            debug!("SIM | {actuator} -> {}", if on { "ON" } else { "OFF" });
            self.outputs.set(actuator, on);
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for SimulatedGreenhouse {
    fn read(&mut self) -> SensorReading {
        self.sensors.step()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for SimulatedGreenhouse {
    fn set_fan(&mut self, on: bool) {
        self.drive(Actuator::Fan, on);
    }

    fn set_buzzer(&mut self, on: bool) {
        self.drive(Actuator::Buzzer, on);
    }

    fn set_led(&mut self, on: bool) {
        self.drive(Actuator::Led, on);
    }

    fn set_valve(&mut self, on: bool) {
        self.drive(Actuator::Valve, on);
    }

    fn set_servo_angle(&mut self, degrees: u8) {
        self.servo_angle = degrees;
        self.drive(Actuator::Servo, degrees >= SERVO_OPEN_DEG);
    }

    fn all_off(&mut self) {
        debug!("SIM | all outputs off");
        self.outputs = ActuatorState::all_off();
        self.servo_angle = SERVO_CLOSED_DEG;
    }
}
