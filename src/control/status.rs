//! Threshold status report for the display layer.
//!
//! Classifies the current reading on each axis the same way the engine
//! does, so the status panel and the actuators never disagree.

use core::fmt;

use crate::config::ThresholdConfig;
use crate::fsm::context::SensorReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureLevel {
    /// Above the alarm threshold: fan and buzzer.
    Critical,
    /// Above the fan threshold: fan only.
    High,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoistureLevel {
    Wet,
    Dry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightLevel {
    Night,
    Day,
}

/// Per-axis classification of one reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusReport {
    pub temperature: TemperatureLevel,
    pub moisture: MoistureLevel,
    pub light: LightLevel,
    reading: SensorReading,
    thresholds: ThresholdConfig,
}

impl StatusReport {
    pub fn assess(reading: SensorReading, thresholds: &ThresholdConfig) -> Self {
        let temperature = if reading.temperature > thresholds.temp_alarm {
            TemperatureLevel::Critical
        } else if reading.temperature > thresholds.temp_fan {
            TemperatureLevel::High
        } else {
            TemperatureLevel::Normal
        };
        let moisture = if reading.moisture >= thresholds.moisture_threshold {
            MoistureLevel::Wet
        } else {
            MoistureLevel::Dry
        };
        let light = if reading.light >= thresholds.light_threshold {
            LightLevel::Night
        } else {
            LightLevel::Day
        };
        Self {
            temperature,
            moisture,
            light,
            reading,
            thresholds: *thresholds,
        }
    }

    /// True only for a critical temperature.
    pub fn is_alarm(&self) -> bool {
        self.temperature == TemperatureLevel::Critical
    }

    pub fn temperature_line(&self) -> String {
        let t = self.reading.temperature;
        let th = &self.thresholds;
        match self.temperature {
            TemperatureLevel::Critical => format!(
                "CRITICAL: temp {t:.1}\u{b0}C > {:.1}\u{b0}C - fan + buzzer",
                th.temp_alarm
            ),
            TemperatureLevel::High => format!(
                "HIGH: temp {t:.1}\u{b0}C > {:.1}\u{b0}C - fan only",
                th.temp_fan
            ),
            TemperatureLevel::Normal => format!(
                "NORMAL: temp {t:.1}\u{b0}C \u{2264} {:.1}\u{b0}C",
                th.temp_fan
            ),
        }
    }

    pub fn moisture_line(&self) -> String {
        let m = self.reading.moisture;
        let th = self.thresholds.moisture_threshold;
        match self.moisture {
            MoistureLevel::Wet => format!("WET: {m} \u{2265} {th} - irrigation active"),
            MoistureLevel::Dry => format!("DRY: {m} < {th} - no irrigation"),
        }
    }

    pub fn light_line(&self) -> String {
        let l = self.reading.light;
        let th = self.thresholds.light_threshold;
        match self.light {
            LightLevel::Night => format!("NIGHT: {l} \u{2265} {th} - LED active"),
            LightLevel::Day => format!("DAY: {l} < {th} - LED inactive"),
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.temperature_line())?;
        writeln!(f, "{}", self.moisture_line())?;
        write!(f, "{}", self.light_line())
    }
}
