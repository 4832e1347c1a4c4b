//! Concrete mode handler functions and table builder.
//!
//! ```text
//!            [StartAutomatic]
//!  MANUAL ──────────────────────▶ AUTOMATIC ──┐
//!    ▲                                ▲       │ [control job due]
//!    │         [StopAutomatic]        └───────┘  evaluate thresholds
//!    └────────────────────────────────────┘
//!          exit: all actuators off, one log entry
//! ```

use super::context::{ActuatorState, FsmContext};
use super::{Mode, StateDescriptor};
use crate::changelog::LogEvent;
use crate::control::engine::ControlEngine;
use log::{debug, info};

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; Mode::COUNT] {
    [
        // Index 0: Manual
        StateDescriptor {
            id: Mode::Manual,
            name: "Manual",
            on_enter: Some(manual_enter),
            on_exit: None,
            on_update: manual_update,
        },
        // Index 1: Automatic
        StateDescriptor {
            id: Mode::Automatic,
            name: "Automatic",
            on_enter: Some(automatic_enter),
            on_exit: Some(automatic_exit),
            on_update: automatic_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  MANUAL
// ═══════════════════════════════════════════════════════════════════════════

fn manual_enter(_ctx: &mut FsmContext) {
    info!("MANUAL: actuators follow operator toggles");
}

fn manual_update(ctx: &mut FsmContext) {
    // A control tick that raced the stop command is dropped.
    ctx.control_due = false;
}

// ═══════════════════════════════════════════════════════════════════════════
//  AUTOMATIC
// ═══════════════════════════════════════════════════════════════════════════

fn automatic_enter(ctx: &mut FsmContext) {
    ctx.record(LogEvent::AutomaticStarted);
    info!(
        "AUTOMATIC: temp {:.1}/{:.1}/{:.1}\u{b0}C, moisture \u{2265}{}, light \u{2265}{}",
        ctx.thresholds.temp_normal,
        ctx.thresholds.temp_fan,
        ctx.thresholds.temp_alarm,
        ctx.thresholds.moisture_threshold,
        ctx.thresholds.light_threshold
    );
}

fn automatic_exit(ctx: &mut FsmContext) {
    ctx.actuators = ActuatorState::all_off();
    ctx.control_due = false;
    ctx.record(LogEvent::AutomaticStopped);
    info!("AUTOMATIC: stopped, all actuators off");
}

fn automatic_update(ctx: &mut FsmContext) {
    if !ctx.control_due {
        return;
    }
    ctx.control_due = false;

    let eval = ControlEngine::evaluate(ctx.reading, &ctx.thresholds, ctx.actuators);
    if eval.is_stable() {
        debug!("AUTOMATIC: stable at {:?}", ctx.reading);
    }
    ctx.actuators = eval.state;
    for change in eval.changes {
        info!("AUTOMATIC: {change}");
        ctx.record(LogEvent::Actuator(change));
    }
}
