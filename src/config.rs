//! System configuration parameters
//!
//! All tunable parameters for the greenhouse controller: the five control
//! thresholds and the scheduler cadences.  Thresholds change at runtime only
//! through an explicit apply; everything else is fixed for the run.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ThresholdField};

/// The five thresholds the control engine compares readings against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// At or below this temperature (°C) the servo closes.
    pub temp_normal: f32,
    /// Above this temperature (°C) the fan runs and the servo opens.
    pub temp_fan: f32,
    /// Above this temperature (°C) the buzzer sounds as well.
    pub temp_alarm: f32,
    /// Raw soil reading (0-1023) at or above which the valve opens.
    pub moisture_threshold: u16,
    /// Raw LDR reading (0-1023) at or above which it is night and the LED lights.
    pub light_threshold: u16,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            temp_normal: 50.0,
            temp_fan: 51.0,
            temp_alarm: 56.0,
            moisture_threshold: 500,
            light_threshold: 500,
        }
    }
}

/// Ranges the configuration panel offers.  Advisory only.
const TEMP_NORMAL_RANGE: (f32, f32) = (30.0, 70.0);
const TEMP_FAN_RANGE: (f32, f32) = (35.0, 75.0);
const TEMP_ALARM_RANGE: (f32, f32) = (40.0, 80.0);
const ANALOG_THRESHOLD_RANGE: (u16, u16) = (300, 800);

/// A threshold that sits outside the range the configuration UI offers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvisoryWarning {
    pub field: ThresholdField,
    pub value: f32,
    pub min: f32,
    pub max: f32,
}

impl core::fmt::Display for AdvisoryWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} = {} is outside the suggested range {}..={}",
            self.field, self.value, self.min, self.max
        )
    }
}

impl ThresholdConfig {
    /// Check the temperature ordering `temp_normal < temp_fan < temp_alarm`.
    ///
    /// Returns the candidate unchanged when it holds.  The analog thresholds
    /// are not bounded here; see [`advisory_warnings`](Self::advisory_warnings).
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.temp_normal >= self.temp_fan {
            return Err(ConfigError::InvalidOrdering {
                lower: ThresholdField::TempNormal,
                lower_value: self.temp_normal,
                upper: ThresholdField::TempFan,
                upper_value: self.temp_fan,
            });
        }
        if self.temp_fan >= self.temp_alarm {
            return Err(ConfigError::InvalidOrdering {
                lower: ThresholdField::TempFan,
                lower_value: self.temp_fan,
                upper: ThresholdField::TempAlarm,
                upper_value: self.temp_alarm,
            });
        }
        Ok(self)
    }

    /// Replace `self` with `candidate` if it validates.
    ///
    /// On error `self` is left exactly as it was.
    pub fn apply(&mut self, candidate: Self) -> Result<(), ConfigError> {
        *self = candidate.validate()?;
        Ok(())
    }

    /// Fields outside the ranges the configuration panel offers.
    pub fn advisory_warnings(&self) -> heapless::Vec<AdvisoryWarning, 5> {
        let mut out = heapless::Vec::new();
        let analog = (
            f32::from(ANALOG_THRESHOLD_RANGE.0),
            f32::from(ANALOG_THRESHOLD_RANGE.1),
        );
        let checks = [
            (ThresholdField::TempNormal, self.temp_normal, TEMP_NORMAL_RANGE),
            (ThresholdField::TempFan, self.temp_fan, TEMP_FAN_RANGE),
            (ThresholdField::TempAlarm, self.temp_alarm, TEMP_ALARM_RANGE),
            (ThresholdField::Moisture, f32::from(self.moisture_threshold), analog),
            (ThresholdField::Light, f32::from(self.light_threshold), analog),
        ];
        for (field, value, (min, max)) in checks {
            if value < min || value > max {
                // One slot per field, cannot overflow.
                let _ = out.push(AdvisoryWarning {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
        out
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Thresholds active at startup.
    pub thresholds: ThresholdConfig,

    // --- Timing ---
    /// Base tick of the control loop (milliseconds)
    pub tick_interval_ms: u32,
    /// Sensor refresh interval (milliseconds)
    pub sensor_refresh_interval_ms: u32,
    /// Automatic control evaluation interval (milliseconds)
    pub control_interval_ms: u32,
    /// Telemetry report interval (milliseconds)
    pub telemetry_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            thresholds: ThresholdConfig::default(),

            // Timing
            tick_interval_ms: 1000,
            sensor_refresh_interval_ms: 1000, // 1 Hz
            control_interval_ms: 3000,        // every 3 s
            telemetry_interval_ms: 10_000,
        }
    }
}

impl SystemConfig {
    /// Validate a configuration loaded at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        for (name, value) in [
            ("tick_interval_ms", self.tick_interval_ms),
            ("sensor_refresh_interval_ms", self.sensor_refresh_interval_ms),
            ("control_interval_ms", self.control_interval_ms),
            ("telemetry_interval_ms", self.telemetry_interval_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroInterval(name));
            }
        }
        Ok(())
    }
}
