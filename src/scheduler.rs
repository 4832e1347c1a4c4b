//! Periodic job scheduler.
//!
//! Counts elapsed milliseconds per job and notifies a
//! [`SchedulerDelegate`] when a job's interval has passed.  The service
//! implements the delegate to collect due jobs for the current tick.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Jobs                                  │
//! │                                                              │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐      │
//! │  │ SensorRefresh│   │ AutoControl  │   │ Telemetry    │      │
//! │  │   1000 ms    │   │   3000 ms    │   │  10000 ms    │      │
//! │  └──────┬───────┘   └──────┬───────┘   └──────┬───────┘      │
//! │         │    registration order = fire order  │              │
//! │         ▼                  ▼                  ▼              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │              SchedulerDelegate                         │  │
//! │  └───────────────────────┬────────────────────────────────┘  │
//! │                          ▼                                   │
//! │                    AppService.tick()                         │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use crate::app::ports::{Job, SchedulerDelegate};
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════
//  Schedule types
// ═══════════════════════════════════════════════════════════════

/// A single schedule entry.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// Human-readable label (e.g., "sensor refresh").
    pub label: &'static str,
    pub job: Job,
    /// Fire every `interval_ms` milliseconds.
    pub interval_ms: u32,
    /// Whether this schedule is currently enabled.
    pub enabled: bool,
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// Maximum number of concurrent schedules (stack-allocated).
pub const MAX_SCHEDULES: usize = 4;

/// The scheduler engine.
///
/// Decoupled from the service: when a job is due it invokes the
/// [`SchedulerDelegate`] callback instead of running the job itself.
pub struct Scheduler {
    schedules: [Option<ScheduleEntry>; MAX_SCHEDULES],
}

/// Internal bookkeeping for a live schedule.
#[derive(Debug, Clone)]
struct ScheduleEntry {
    schedule: Schedule,
    /// Milliseconds elapsed since last fire (or since armed).
    elapsed_ms: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            schedules: [None, None, None, None],
        }
    }

    /// Add a schedule.  Returns the slot index, or `None` if full.
    pub fn add(&mut self, schedule: Schedule) -> Option<usize> {
        for (i, slot) in self.schedules.iter_mut().enumerate() {
            if slot.is_none() {
                info!(
                    "Scheduler: added '{}' at slot {} (every {} ms)",
                    schedule.label, i, schedule.interval_ms
                );
                *slot = Some(ScheduleEntry {
                    schedule,
                    elapsed_ms: 0,
                });
                return Some(i);
            }
        }
        None // All slots full.
    }

    /// Enable `job` and restart its interval from zero.
    pub fn arm(&mut self, job: Job) {
        for entry in self.entries_for(job) {
            entry.schedule.enabled = true;
            entry.elapsed_ms = 0;
            debug!("Scheduler: armed '{}'", entry.schedule.label);
        }
    }

    /// Disable `job`.  Its elapsed time is discarded on the next `arm`.
    pub fn disarm(&mut self, job: Job) {
        for entry in self.entries_for(job) {
            entry.schedule.enabled = false;
            debug!("Scheduler: disarmed '{}'", entry.schedule.label);
        }
    }

    pub fn is_armed(&self, job: Job) -> bool {
        self.schedules
            .iter()
            .flatten()
            .any(|e| e.schedule.job == job && e.schedule.enabled)
    }

    /// Advance every enabled schedule by `elapsed_ms`.
    ///
    /// Each job whose interval has passed is reported to `delegate` once,
    /// in registration order.  A tick longer than the interval still fires
    /// only once; the remainder carries over.
    pub fn tick(&mut self, elapsed_ms: u32, delegate: &mut dyn SchedulerDelegate) {
        for slot in self.schedules.iter_mut() {
            let entry = match slot {
                Some(e) if e.schedule.enabled => e,
                _ => continue,
            };

            entry.elapsed_ms += u64::from(elapsed_ms);
            let interval = u64::from(entry.schedule.interval_ms);
            if interval > 0 && entry.elapsed_ms >= interval {
                entry.elapsed_ms = (entry.elapsed_ms - interval).min(interval - 1);
                delegate.on_job_due(entry.schedule.label, entry.schedule.job);
            }
        }
    }

    fn entries_for(&mut self, job: Job) -> impl Iterator<Item = &mut ScheduleEntry> {
        self.schedules
            .iter_mut()
            .flatten()
            .filter(move |e| e.schedule.job == job)
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
