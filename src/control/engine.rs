//! Threshold decision engine.
//!
//! Maps one [`SensorReading`] plus the active [`ThresholdConfig`] onto the
//! next [`ActuatorState`].  Every axis switches immediately on its
//! comparison; there is no hysteresis band.
//!
//! ```text
//!  temperature ──┬─ t > alarm ───────────▶ fan ON,  buzzer ON
//!                ├─ t > fan ─────────────▶ fan ON,  buzzer OFF
//!                └─ otherwise ───────────▶ fan OFF, buzzer OFF
//!
//!  servo ────────┬─ t > fan ─────────────▶ open
//!                ├─ t ≤ normal ──────────▶ closed
//!                └─ normal < t ≤ fan ────▶ unchanged (dead zone)
//!
//!  moisture ≥ threshold ─────────────────▶ valve ON
//!  light    ≥ threshold ─────────────────▶ LED ON (night)
//! ```

use core::fmt;

use crate::config::ThresholdConfig;
use crate::fsm::context::{Actuator, ActuatorState, SensorReading};

/// At most one transition per actuator per evaluation.
pub const MAX_CHANGES: usize = Actuator::ALL.len();

/// Transitions produced by a single evaluation, in axis order.
pub type ChangeSet = heapless::Vec<Transition, MAX_CHANGES>;

// ═══════════════════════════════════════════════════════════════
//  Transition description
// ═══════════════════════════════════════════════════════════════

/// The comparison that decided an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Above,
    AtOrAbove,
    Below,
    AtOrBelow,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Above => write!(f, ">"),
            Self::AtOrAbove => write!(f, "\u{2265}"),
            Self::Below => write!(f, "<"),
            Self::AtOrBelow => write!(f, "\u{2264}"),
        }
    }
}

/// The sensor value and threshold behind a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    Temperature {
        celsius: f32,
        cmp: Comparison,
        threshold: f32,
    },
    Moisture {
        raw: u16,
        cmp: Comparison,
        threshold: u16,
    },
    Light {
        raw: u16,
        cmp: Comparison,
        threshold: u16,
    },
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature {
                celsius,
                cmp,
                threshold,
            } => write!(f, "temp {celsius:.1}\u{b0}C {cmp} {threshold:.1}\u{b0}C"),
            Self::Moisture {
                raw,
                cmp,
                threshold,
            } => write!(f, "moisture {raw} {cmp} {threshold}"),
            Self::Light {
                raw,
                cmp,
                threshold,
            } => {
                let period = if matches!(cmp, Comparison::AtOrAbove) {
                    "night"
                } else {
                    "day"
                };
                write!(f, "light {raw} {cmp} {threshold}, {period}")
            }
        }
    }
}

/// One actuator changing state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub actuator: Actuator,
    /// New state: on, or open for the servo.
    pub on: bool,
    pub trigger: Trigger,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.actuator, self.on) {
            (Actuator::Servo, true) => write!(f, "Servo opened to 90\u{b0} ({})", self.trigger),
            (Actuator::Servo, false) => write!(f, "Servo closed to 0\u{b0} ({})", self.trigger),
            (a, on) => write!(
                f,
                "{a} switched {} automatically ({})",
                if on { "ON" } else { "OFF" },
                self.trigger
            ),
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Engine
// ═══════════════════════════════════════════════════════════════

/// Result of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub state: ActuatorState,
    pub changes: ChangeSet,
}

impl Evaluation {
    pub fn is_stable(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Stateless threshold controller.
pub struct ControlEngine;

impl ControlEngine {
    /// Compute the next actuator state.
    ///
    /// Pure: the same `(reading, config, previous)` always yields the same
    /// result, and a `previous` that already matches yields no changes.
    pub fn evaluate(
        reading: SensorReading,
        config: &ThresholdConfig,
        previous: ActuatorState,
    ) -> Evaluation {
        let t = reading.temperature;
        let temp = |cmp, threshold| Trigger::Temperature {
            celsius: t,
            cmp,
            threshold,
        };

        let mut changes = ChangeSet::new();
        let mut next = previous;
        let mut decide = |actuator: Actuator, on: bool, trigger: Trigger| {
            if previous.get(actuator) != on {
                next.set(actuator, on);
                // At most one push per actuator; capacity covers all of them.
                let _ = changes.push(Transition {
                    actuator,
                    on,
                    trigger,
                });
            }
        };

        // ── Temperature: fan + buzzer ─────────────────────────
        if t > config.temp_alarm {
            let cause = temp(Comparison::Above, config.temp_alarm);
            decide(Actuator::Fan, true, cause);
            decide(Actuator::Buzzer, true, cause);
        } else if t > config.temp_fan {
            decide(Actuator::Fan, true, temp(Comparison::Above, config.temp_fan));
            decide(
                Actuator::Buzzer,
                false,
                temp(Comparison::AtOrBelow, config.temp_alarm),
            );
        } else {
            decide(
                Actuator::Fan,
                false,
                temp(Comparison::AtOrBelow, config.temp_fan),
            );
            decide(
                Actuator::Buzzer,
                false,
                temp(Comparison::AtOrBelow, config.temp_alarm),
            );
        }

        // ── Moisture: valve ───────────────────────────────────
        let wet = reading.moisture >= config.moisture_threshold;
        decide(
            Actuator::Valve,
            wet,
            Trigger::Moisture {
                raw: reading.moisture,
                cmp: if wet {
                    Comparison::AtOrAbove
                } else {
                    Comparison::Below
                },
                threshold: config.moisture_threshold,
            },
        );

        // ── Light: LED ────────────────────────────────────────
        let night = reading.light >= config.light_threshold;
        decide(
            Actuator::Led,
            night,
            Trigger::Light {
                raw: reading.light,
                cmp: if night {
                    Comparison::AtOrAbove
                } else {
                    Comparison::Below
                },
                threshold: config.light_threshold,
            },
        );

        // ── Servo: ventilation assist ─────────────────────────
        if t > config.temp_fan {
            decide(Actuator::Servo, true, temp(Comparison::Above, config.temp_fan));
        } else if t <= config.temp_normal {
            decide(
                Actuator::Servo,
                false,
                temp(Comparison::AtOrBelow, config.temp_normal),
            );
        }

        Evaluation {
            state: next,
            changes,
        }
    }
}
