//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  A status panel or network publisher would implement
//! the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                let a = &t.actuators;
                info!(
                    "TELEM | mode={:?} | T={:.1}\u{00b0}C moisture={} ({}%) light={} | \
                     fan={} buzzer={} led={} valve={} servo={}\u{00b0} | log={}",
                    t.mode,
                    t.reading.temperature,
                    t.reading.moisture,
                    t.moisture_percent,
                    t.reading.light,
                    on_off(a.fan_on),
                    on_off(a.buzzer_on),
                    on_off(a.led_on),
                    on_off(a.valve_on),
                    a.servo_angle(),
                    t.log_len,
                );
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE | {:?} -> {:?}", from, to);
            }
            AppEvent::Logged(entry) => {
                info!("LOG | {entry}");
            }
            AppEvent::ThresholdsRejected(e) => {
                warn!("CONFIG | rejected: {e}");
            }
            AppEvent::LogCleared => {
                info!("LOG | cleared");
            }
            AppEvent::Started(mode) => {
                info!("START | initial_mode={:?}", mode);
            }
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}
