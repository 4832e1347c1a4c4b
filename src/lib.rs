//! Greenhouse controller library.
//!
//! Threshold-driven control of fan, buzzer, grow light, irrigation valve
//! and vent servo from temperature, soil moisture and light readings.
//! Exposes the pure-logic modules for the host binary and integration
//! tests; every device and clock sits behind a port trait in
//! [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod changelog;
pub mod config;
pub mod control;
pub mod error;
pub mod fsm;
pub mod scheduler;
pub mod sensors;

pub use error::{Error, Result};
