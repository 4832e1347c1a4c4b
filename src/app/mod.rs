//! Application core: pure domain logic, zero I/O.
//!
//! Mode orchestration, threshold control and job scheduling for the
//! greenhouse.  All interaction with sensors, outputs and the clock goes
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
