//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensor source, actuator outputs, clock, event sinks)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches a device
//! or the wall clock directly.

use chrono::NaiveTime;

use crate::fsm::context::SensorReading;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: environment → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this on every refresh job.
pub trait SensorPort {
    /// Produce the next reading.  Values are already in engineering units:
    /// temperature in °C, moisture and light as raw 10-bit ADC counts.
    fn read(&mut self) -> SensorReading;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → outputs)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this after every state change.
pub trait ActuatorPort {
    fn set_fan(&mut self, on: bool);

    fn set_buzzer(&mut self, on: bool);

    /// Grow light.
    fn set_led(&mut self, on: bool);

    /// Irrigation valve.
    fn set_valve(&mut self, on: bool);

    /// Vent servo position in degrees (0 closed, 90 open).
    fn set_servo_angle(&mut self, degrees: u8);

    /// Kill all outputs and close the vent.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Wall-clock source for change-log timestamps.
pub trait ClockPort {
    fn now(&self) -> NaiveTime;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / display)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (log lines, a status
/// panel, a test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples scheduler from the service)
// ───────────────────────────────────────────────────────────────

/// Callback trait that the scheduler invokes when a job becomes due.
///
/// The [`Scheduler`](crate::scheduler::Scheduler) only counts time; the
/// service implements this to collect due jobs and run them in order.
pub trait SchedulerDelegate {
    /// * `label`: the human-readable label of the schedule.
    /// * `job`: which periodic job is due.
    fn on_job_due(&mut self, label: &str, job: Job);
}

/// The periodic jobs the controller runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Job {
    /// Pull a fresh reading from the [`SensorPort`].
    SensorRefresh,
    /// Run the control engine (automatic mode only).
    AutoControl,
    /// Emit a telemetry snapshot.
    Telemetry,
}
