//! Function-pointer finite state machine for the operating mode.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  StateTable                                                │
//! │  ┌───────────┬────────────┬────────────┬───────────────┐   │
//! │  │ Mode      │ on_enter   │ on_exit    │ on_update     │   │
//! │  ├───────────┼────────────┼────────────┼───────────────┤   │
//! │  │ Manual    │ fn(ctx)    │ -          │ fn(ctx)       │   │
//! │  │ Automatic │ fn(ctx)    │ fn(ctx)    │ fn(ctx)       │   │
//! │  └───────────┴────────────┴────────────┴───────────────┘   │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** mode.  Mode
//! changes come only from operator commands through
//! [`Fsm::force_transition`], which runs `on_exit` for the current mode and
//! `on_enter` for the next.  All handlers receive `&mut FsmContext`.

pub mod context;
pub mod states;

use context::FsmContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Operating mode.  Must stay in sync with [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mode {
    /// Actuators follow operator toggles.
    Manual = 0,
    /// Actuators follow the control engine.
    Automatic = 1,
}

impl Mode {
    /// Total number of modes, used to size the table array.
    pub const COUNT: usize = 2;

    /// Convert a table index back to `Mode`.  Panics on out-of-range in
    /// debug builds; returns `Manual` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Manual,
            1 => Self::Automatic,
            _ => {
                debug_assert!(false, "invalid mode index: {idx}");
                Self::Manual
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter`, `on_exit` and the per-tick `on_update`.
pub type StateActionFn = fn(&mut FsmContext);

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

pub struct StateDescriptor {
    pub id: Mode,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateActionFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
pub struct Fsm {
    table: [StateDescriptor; Mode::COUNT],
    current: usize,
}

impl Fsm {
    pub fn new(table: [StateDescriptor; Mode::COUNT], initial: Mode) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter`.  Call once before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("FSM starting in mode: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Run the current mode's `on_update` once.
    pub fn tick(&self, ctx: &mut FsmContext) {
        (self.table[self.current].on_update)(ctx);
    }

    /// Switch mode immediately.  Returns `false` when already in `next`.
    pub fn force_transition(&mut self, next: Mode, ctx: &mut FsmContext) -> bool {
        let next_idx = next as usize;
        if next_idx == self.current {
            return false;
        }

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
        true
    }

    pub fn current_state(&self) -> Mode {
        Mode::from_index(self.current)
    }
}
