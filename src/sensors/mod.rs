//! Sensor subsystem: unit helpers and the simulated environment source.
//!
//! Moisture and light arrive as raw 10-bit ADC counts (0–1023).  The
//! moisture probe reads high when dry, so the display-side percentage is
//! inverted.

pub mod simulator;

pub use simulator::SensorSimulator;

/// Full-scale reading of the 10-bit ADC.
pub const ADC_MAX: u16 = 1023;

/// Convert a raw moisture count to percent wet (1023 → 0 %, 0 → 100 %).
/// Counts above full scale read as 0 %.
pub fn moisture_percent(raw: u16) -> u8 {
    let dry = u32::from(ADC_MAX - raw.min(ADC_MAX));
    (dry * 100 / u32::from(ADC_MAX)) as u8
}
