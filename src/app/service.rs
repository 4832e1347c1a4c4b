//! Application service, the hexagonal core.
//!
//! [`AppService`] owns the mode FSM, the job scheduler and the shared
//! context.  It exposes a clean, hardware-agnostic API.  All I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!   ClockPort ──▶ │        AppService        │
//! ActuatorPort ◀──│  FSM · Engine · Schedule │
//!                 └──────────────────────────┘
//! ```
//!
//! Within one tick the refresh job runs before the control job, so an
//! evaluation always sees the reading taken on that same tick when both
//! are due together.

use log::{debug, info, warn};

use crate::changelog::{ChangeLog, LogEvent};
use crate::config::{SystemConfig, ThresholdConfig};
use crate::control::status::StatusReport;
use crate::error::{Error, Result};
use crate::fsm::context::{ActuatorState, FsmContext, SensorReading};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, Mode};
use crate::scheduler::{MAX_SCHEDULES, Schedule, Scheduler};
use crate::sensors::moisture_percent;

use super::commands::AppCommand;
use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, ClockPort, EventSink, Job, SchedulerDelegate, SensorPort};

// ───────────────────────────────────────────────────────────────
// Due-job collector
// ───────────────────────────────────────────────────────────────

/// Scheduler delegate that gathers the jobs due this tick.
#[derive(Default)]
struct DueJobs(heapless::Vec<Job, MAX_SCHEDULES>);

impl SchedulerDelegate for DueJobs {
    fn on_job_due(&mut self, label: &str, job: Job) {
        debug!("job due: {label}");
        // One entry per schedule slot at most.
        let _ = self.0.push(job);
    }
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    fsm: Fsm,
    ctx: FsmContext,
    scheduler: Scheduler,
    /// Milliseconds per base tick (from config).
    tick_ms: u32,
    /// Sole tick counter; the FSM keeps none.
    tick_count: u64,
}

impl AppService {
    /// Construct the service from a configuration, rejecting it if the
    /// thresholds are misordered or any interval is zero.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Result<Self> {
        config.validate()?;

        let mut scheduler = Scheduler::new();
        scheduler.add(Schedule {
            label: "sensor refresh",
            job: Job::SensorRefresh,
            interval_ms: config.sensor_refresh_interval_ms,
            enabled: true,
        });
        // Armed by StartAutomatic.
        scheduler.add(Schedule {
            label: "auto control",
            job: Job::AutoControl,
            interval_ms: config.control_interval_ms,
            enabled: false,
        });
        scheduler.add(Schedule {
            label: "telemetry",
            job: Job::Telemetry,
            interval_ms: config.telemetry_interval_ms,
            enabled: true,
        });

        Ok(Self {
            fsm: Fsm::new(build_state_table(), Mode::Manual),
            ctx: FsmContext::new(config.thresholds),
            scheduler,
            tick_ms: config.tick_interval_ms,
            tick_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in its initial mode (Manual).
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("AppService started in {:?}", self.fsm.current_state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one base tick: scheduler → sensor refresh → FSM → actuators.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`], which avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        self.ctx.now = clock.now();
        let mark = self.ctx.log.len();

        // 1. Which jobs are due this tick
        let mut due = DueJobs::default();
        self.scheduler.tick(self.tick_ms, &mut due);

        // 2. Run them in registration order
        let mut telemetry_due = false;
        for job in due.0 {
            match job {
                Job::SensorRefresh => self.ctx.reading = hw.read(),
                Job::AutoControl => self.ctx.control_due = true,
                Job::Telemetry => telemetry_due = true,
            }
        }

        // 3. FSM tick (pure mode logic + evaluation)
        self.fsm.tick(&mut self.ctx);

        // 4. Apply actuator state via ActuatorPort
        self.apply_actuators(hw);

        // 5. Surface new log entries and telemetry
        self.flush_log(mark, sink);
        if telemetry_due {
            sink.emit(&AppEvent::Telemetry(self.build_telemetry()));
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an operator command.
    ///
    /// Rejected thresholds and manual toggles in automatic mode return an
    /// error; the service state is left untouched in both cases.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        hw: &mut impl ActuatorPort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        self.ctx.now = clock.now();
        let mark = self.ctx.log.len();

        let result = match cmd {
            AppCommand::StartAutomatic => {
                self.switch_mode(Mode::Automatic, sink);
                Ok(())
            }
            AppCommand::StopAutomatic => {
                if self.switch_mode(Mode::Manual, sink) {
                    hw.all_off();
                }
                Ok(())
            }
            AppCommand::ApplyThresholds(candidate) => self.apply_thresholds(candidate, sink),
            AppCommand::ClearLog => {
                self.ctx.log.clear();
                sink.emit(&AppEvent::LogCleared);
                info!("Change log cleared");
                Ok(())
            }
            AppCommand::Toggle(actuator) => {
                if self.fsm.current_state() == Mode::Automatic {
                    warn!("Ignoring manual {actuator} toggle in automatic mode");
                    Err(Error::ManualOnly(actuator))
                } else {
                    let on = self.ctx.actuators.toggle(actuator);
                    self.ctx.record(LogEvent::ManualToggle { actuator, on });
                    self.apply_actuators(hw);
                    Ok(())
                }
            }
        };

        self.flush_log(mark, sink);
        result
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.fsm.current_state()
    }

    pub fn actuators(&self) -> ActuatorState {
        self.ctx.actuators
    }

    /// Reading from the most recent refresh job.
    pub fn reading(&self) -> SensorReading {
        self.ctx.reading
    }

    pub fn thresholds(&self) -> ThresholdConfig {
        self.ctx.thresholds
    }

    pub fn change_log(&self) -> &ChangeLog {
        &self.ctx.log
    }

    /// Per-axis classification of the latest reading.
    pub fn status_report(&self) -> StatusReport {
        StatusReport::assess(self.ctx.reading, &self.ctx.thresholds)
    }

    /// Build a telemetry snapshot from the current context.
    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            mode: self.fsm.current_state(),
            reading: self.ctx.reading,
            moisture_percent: moisture_percent(self.ctx.reading.moisture),
            actuators: self.ctx.actuators,
            log_len: self.ctx.log.len(),
        }
    }

    /// Total ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Whether periodic evaluation is scheduled.
    pub fn control_armed(&self) -> bool {
        self.scheduler.is_armed(Job::AutoControl)
    }

    // ── Internal ──────────────────────────────────────────────

    /// Move the FSM to `to`, keeping the control job in step.  Returns
    /// `false` when already there.
    fn switch_mode(&mut self, to: Mode, sink: &mut impl EventSink) -> bool {
        let from = self.fsm.current_state();
        if !self.fsm.force_transition(to, &mut self.ctx) {
            debug!("Already in {to:?}");
            return false;
        }
        match to {
            Mode::Automatic => self.scheduler.arm(Job::AutoControl),
            Mode::Manual => self.scheduler.disarm(Job::AutoControl),
        }
        sink.emit(&AppEvent::ModeChanged { from, to });
        true
    }

    fn apply_thresholds(
        &mut self,
        candidate: ThresholdConfig,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match self.ctx.thresholds.apply(candidate) {
            Ok(()) => {
                for w in candidate.advisory_warnings() {
                    warn!("Threshold outside advisory range: {w}");
                }
                self.ctx.record(LogEvent::ThresholdsApplied(candidate));
                info!("Thresholds applied: {candidate:?}");
                Ok(())
            }
            Err(e) => {
                warn!("Thresholds rejected: {e}");
                sink.emit(&AppEvent::ThresholdsRejected(e));
                Err(e.into())
            }
        }
    }

    /// Translate the context's actuator state into port calls.
    fn apply_actuators(&self, hw: &mut impl ActuatorPort) {
        let s = &self.ctx.actuators;
        hw.set_fan(s.fan_on);
        hw.set_buzzer(s.buzzer_on);
        hw.set_led(s.led_on);
        hw.set_valve(s.valve_on);
        hw.set_servo_angle(s.servo_angle());
    }

    /// Emit every log entry appended since `mark`.
    fn flush_log(&self, mark: usize, sink: &mut impl EventSink) {
        for entry in self.ctx.log.entries().iter().skip(mark) {
            sink.emit(&AppEvent::Logged(*entry));
        }
    }
}
