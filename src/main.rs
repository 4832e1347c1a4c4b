//! Greenhouse controller: host simulation entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  SimulatedGreenhouse   LogEventSink    SystemClock             │
//! │  (Sensor+Actuator)     (EventSink)     (ClockPort)             │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Mode FSM · ControlEngine · Scheduler                  │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `greenhouse-sim [CONFIG.json] [TICKS]`
//!
//! Without `TICKS` the loop runs until the process is killed.  The log
//! filter comes from `RUST_LOG` (default `info`).

use std::path::Path;
use std::time::Duration;
use std::{env, fs, thread};

use anyhow::{Context, Result};
use log::{info, warn};

use greenhouse::adapters::log_sink::LogEventSink;
use greenhouse::adapters::simulated::SimulatedGreenhouse;
use greenhouse::adapters::time::SystemClock;
use greenhouse::app::commands::AppCommand;
use greenhouse::app::service::AppService;
use greenhouse::config::SystemConfig;
use greenhouse::sensors::SensorSimulator;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init()
        .context("failed to initialise logger")?;

    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(Path::new(&path))?,
        None => {
            info!("No config file given, using defaults");
            SystemConfig::default()
        }
    };
    let ticks: Option<u64> = args
        .next()
        .map(|s| s.parse().with_context(|| format!("invalid tick count: {s}")))
        .transpose()?;

    for w in config.thresholds.advisory_warnings() {
        warn!("Threshold outside advisory range: {w}");
    }

    let tick = Duration::from_millis(u64::from(config.tick_interval_ms));
    let mut app = AppService::new(config).context("invalid configuration")?;
    let mut hw = SimulatedGreenhouse::new(SensorSimulator::new());
    let clock = SystemClock::new();
    let mut sink = LogEventSink::new();

    app.start(&mut sink);
    app.handle_command(AppCommand::StartAutomatic, &mut hw, &clock, &mut sink)?;

    let mut remaining = ticks;
    while remaining != Some(0) {
        thread::sleep(tick);
        app.tick(&mut hw, &clock, &mut sink);
        if app.status_report().is_alarm() {
            warn!("{}", app.status_report().temperature_line());
        }
        remaining = remaining.map(|n| n - 1);
    }

    app.handle_command(AppCommand::StopAutomatic, &mut hw, &clock, &mut sink)?;
    info!(
        "Stopped after {} ticks, {} log entries\n{}",
        app.tick_count(),
        app.change_log().len(),
        app.status_report()
    );
    Ok(())
}

fn load_config(path: &Path) -> Result<SystemConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: SystemConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}
