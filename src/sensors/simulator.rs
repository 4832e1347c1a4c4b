//! Bounded random-walk environment.
//!
//! Stands in for the real probes: each refresh nudges every axis by a
//! small uniform step and clamps it to a plausible greenhouse range.
//!
//! | Axis        | Start | Step (±) | Range       |
//! |-------------|-------|----------|-------------|
//! | temperature | 25.0  | 1.0 °C   | 15.0 – 75.0 |
//! | moisture    | 450   | 25       | 200 – 800   |
//! | light       | 300   | 20       | 100 – 900   |

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::fsm::context::SensorReading;

pub const TEMP_MIN: f32 = 15.0;
pub const TEMP_MAX: f32 = 75.0;
pub const MOISTURE_MIN: u16 = 200;
pub const MOISTURE_MAX: u16 = 800;
pub const LIGHT_MIN: u16 = 100;
pub const LIGHT_MAX: u16 = 900;

/// Full width of one step; the walk moves by `(u - 0.5) * span`.
const TEMP_SPAN: f32 = 2.0;
const MOISTURE_SPAN: f32 = 50.0;
const LIGHT_SPAN: f32 = 40.0;

pub struct SensorSimulator {
    rng: StdRng,
    current: SensorReading,
}

impl SensorSimulator {
    /// Seeded from the OS entropy source.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic walk for tests and reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            current: SensorReading::default(),
        }
    }

    /// Last value returned by [`step`](Self::step), or the start point.
    pub fn current(&self) -> SensorReading {
        self.current
    }

    /// Advance the walk by one refresh and return the new reading.
    pub fn step(&mut self) -> SensorReading {
        let dt = (self.rng.random::<f32>() - 0.5) * TEMP_SPAN;
        let dm = ((self.rng.random::<f32>() - 0.5) * MOISTURE_SPAN) as i32;
        let dl = ((self.rng.random::<f32>() - 0.5) * LIGHT_SPAN) as i32;

        let r = &mut self.current;
        r.temperature = (r.temperature + dt).clamp(TEMP_MIN, TEMP_MAX);
        r.moisture = walk(r.moisture, dm, MOISTURE_MIN, MOISTURE_MAX);
        r.light = walk(r.light, dl, LIGHT_MIN, LIGHT_MAX);
        self.current
    }
}

impl Default for SensorSimulator {
    fn default() -> Self {
        Self::new()
    }
}

fn walk(value: u16, delta: i32, min: u16, max: u16) -> u16 {
    (i32::from(value) + delta).clamp(i32::from(min), i32::from(max)) as u16
}
