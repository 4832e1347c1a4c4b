//! Integration tests for the AppService → FSM → engine → actuators pipeline.
//!
//! With the default config the refresh job runs every tick (1 s) and the
//! control job every third tick (3 s) once automatic mode is armed.  The
//! two cadences are independent; a control tick always evaluates the
//! reading taken by the refresh that ran earlier in the same tick.

use greenhouse::Error;
use greenhouse::app::commands::AppCommand;
use greenhouse::app::events::AppEvent;
use greenhouse::app::service::AppService;
use greenhouse::changelog::LogEvent;
use greenhouse::config::{SystemConfig, ThresholdConfig};
use greenhouse::error::{ConfigError, ThresholdField};
use greenhouse::fsm::Mode;
use greenhouse::fsm::context::{Actuator, ActuatorState, SensorReading};

use super::mock_hw::{ActuatorCall, COOL_DAY, FixedClock, HOT_NIGHT, MockHardware, RecordingSink};

fn make_app() -> (AppService, MockHardware, FixedClock, RecordingSink) {
    let mut app = AppService::new(SystemConfig::default()).unwrap();
    let hw = MockHardware::new();
    let clock = FixedClock::at(8, 30, 0);
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    (app, hw, clock, sink)
}

fn all_on() -> ActuatorState {
    ActuatorState {
        fan_on: true,
        buzzer_on: true,
        led_on: true,
        valve_on: true,
        servo_open: true,
    }
}

fn run(
    app: &mut AppService,
    hw: &mut MockHardware,
    clock: &FixedClock,
    sink: &mut RecordingSink,
    ticks: usize,
) {
    for _ in 0..ticks {
        app.tick(hw, clock, sink);
    }
}

// ── Cadence ───────────────────────────────────────────────────

#[test]
fn first_evaluation_one_control_interval_after_start() {
    let (mut app, _, clock, mut sink) = make_app();
    let mut hw = MockHardware::steady(HOT_NIGHT);

    app.handle_command(AppCommand::StartAutomatic, &mut hw, &clock, &mut sink)
        .unwrap();
    assert!(app.control_armed());

    run(&mut app, &mut hw, &clock, &mut sink, 2);
    assert!(app.actuators().is_all_off(), "no evaluation before 3 s");
    assert_eq!(app.reading(), HOT_NIGHT);

    app.tick(&mut hw, &clock, &mut sink);
    assert_eq!(app.actuators(), all_on());
    assert!(hw.fan_on());
    assert_eq!(hw.servo_angle(), 90);
}

#[test]
fn refresh_runs_every_tick_regardless_of_mode() {
    let (mut app, mut hw, clock, mut sink) = make_app();
    run(&mut app, &mut hw, &clock, &mut sink, 5);
    assert_eq!(hw.reads, 5);
    assert_eq!(app.tick_count(), 5);
}

#[test]
fn tick_count_spans_mode_changes() {
    let (mut app, mut hw, clock, mut sink) = make_app();
    run(&mut app, &mut hw, &clock, &mut sink, 2);
    app.handle_command(AppCommand::StartAutomatic, &mut hw, &clock, &mut sink)
        .unwrap();
    run(&mut app, &mut hw, &clock, &mut sink, 4);
    app.handle_command(AppCommand::StopAutomatic, &mut hw, &clock, &mut sink)
        .unwrap();
    run(&mut app, &mut hw, &clock, &mut sink, 1);
    assert_eq!(app.tick_count(), 7);
    assert_eq!(app.mode(), Mode::Manual);
}

#[test]
fn evaluation_sees_most_recent_refresh() {
    let (mut app, mut hw, clock, mut sink) = make_app();
    hw.push_reading(HOT_NIGHT);
    hw.push_reading(HOT_NIGHT);
    hw.push_reading(COOL_DAY);

    app.handle_command(AppCommand::StartAutomatic, &mut hw, &clock, &mut sink)
        .unwrap();
    run(&mut app, &mut hw, &clock, &mut sink, 3);

    // The hot readings were never evaluated.
    assert!(app.actuators().is_all_off());
    assert_eq!(app.change_log().len(), 1);
}

#[test]
fn manual_mode_never_evaluates() {
    let (mut app, _, clock, mut sink) = make_app();
    let mut hw = MockHardware::steady(HOT_NIGHT);
    run(&mut app, &mut hw, &clock, &mut sink, 12);
    assert!(app.actuators().is_all_off());
    assert!(app.change_log().is_empty());
}

// ── Scenarios ─────────────────────────────────────────────────

#[test]
fn hot_night_then_cool_day() {
    let (mut app, _, clock, mut sink) = make_app();
    let mut hw = MockHardware::steady(HOT_NIGHT);
    app.handle_command(AppCommand::StartAutomatic, &mut hw, &clock, &mut sink)
        .unwrap();

    run(&mut app, &mut hw, &clock, &mut sink, 3);
    assert_eq!(app.actuators(), all_on());
    assert_eq!(app.change_log().len(), 1 + 5);

    hw.set_reading(COOL_DAY);
    run(&mut app, &mut hw, &clock, &mut sink, 3);
    assert_eq!(app.actuators(), ActuatorState::all_off());
    assert_eq!(app.change_log().len(), 1 + 5 + 5);
    assert!(!hw.fan_on());
    assert_eq!(hw.servo_angle(), 0);
}

#[test]
fn stable_readings_do_not_grow_the_log() {
    let (mut app, _, clock, mut sink) = make_app();
    let mut hw = MockHardware::steady(HOT_NIGHT);
    app.handle_command(AppCommand::StartAutomatic, &mut hw, &clock, &mut sink)
        .unwrap();

    run(&mut app, &mut hw, &clock, &mut sink, 30);
    assert_eq!(app.change_log().len(), 1 + 5);
}

#[test]
fn transitions_are_logged_with_timestamp_and_reason() {
    let (mut app, _, clock, mut sink) = make_app();
    let mut hw = MockHardware::steady(HOT_NIGHT);
    app.handle_command(AppCommand::StartAutomatic, &mut hw, &clock, &mut sink)
        .unwrap();
    clock.set(8, 30, 3);
    run(&mut app, &mut hw, &clock, &mut sink, 3);

    let entries = app.change_log().entries();
    assert_eq!(
        entries[0].to_string(),
        "[08:30:00] Automatic mode started: actuators follow the thresholds"
    );
    assert_eq!(
        entries[1].to_string(),
        "[08:30:03] Fan switched ON automatically (temp 57.0\u{b0}C > 56.0\u{b0}C)"
    );

    // Every appended entry was also surfaced through the sink.
    assert_eq!(sink.logged_messages().len(), entries.len());
}

// ── Stop ──────────────────────────────────────────────────────

#[test]
fn stop_forces_all_off_with_one_entry() {
    let (mut app, _, clock, mut sink) = make_app();
    let mut hw = MockHardware::steady(HOT_NIGHT);
    app.handle_command(AppCommand::StartAutomatic, &mut hw, &clock, &mut sink)
        .unwrap();
    run(&mut app, &mut hw, &clock, &mut sink, 3);
    let before = app.change_log().len();

    app.handle_command(AppCommand::StopAutomatic, &mut hw, &clock, &mut sink)
        .unwrap();

    assert_eq!(app.mode(), Mode::Manual);
    assert_eq!(app.actuators(), ActuatorState::all_off());
    assert_eq!(app.change_log().len(), before + 1);
    assert_eq!(
        app.change_log().last().map(|e| e.event),
        Some(LogEvent::AutomaticStopped)
    );
    assert_eq!(hw.last_call(), Some(&ActuatorCall::AllOff));
    assert!(!app.control_armed());
}

#[test]
fn stop_halts_periodic_evaluation() {
    let (mut app, _, clock, mut sink) = make_app();
    let mut hw = MockHardware::steady(COOL_DAY);
    app.handle_command(AppCommand::StartAutomatic, &mut hw, &clock, &mut sink)
        .unwrap();
    run(&mut app, &mut hw, &clock, &mut sink, 2);
    app.handle_command(AppCommand::StopAutomatic, &mut hw, &clock, &mut sink)
        .unwrap();
    let before = app.change_log().len();

    hw.set_reading(HOT_NIGHT);
    run(&mut app, &mut hw, &clock, &mut sink, 9);
    assert!(app.actuators().is_all_off());
    assert_eq!(app.change_log().len(), before);
}

#[test]
fn restart_waits_a_full_interval() {
    let (mut app, _, clock, mut sink) = make_app();
    let mut hw = MockHardware::steady(HOT_NIGHT);
    app.handle_command(AppCommand::StartAutomatic, &mut hw, &clock, &mut sink)
        .unwrap();
    run(&mut app, &mut hw, &clock, &mut sink, 2);
    app.handle_command(AppCommand::StopAutomatic, &mut hw, &clock, &mut sink)
        .unwrap();
    app.handle_command(AppCommand::StartAutomatic, &mut hw, &clock, &mut sink)
        .unwrap();

    run(&mut app, &mut hw, &clock, &mut sink, 2);
    assert!(app.actuators().is_all_off());
    app.tick(&mut hw, &clock, &mut sink);
    assert_eq!(app.actuators(), all_on());
}

// ── Thresholds ────────────────────────────────────────────────

#[test]
fn misordered_thresholds_are_rejected() {
    let (mut app, mut hw, clock, mut sink) = make_app();
    let before = app.thresholds();
    let candidate = ThresholdConfig {
        temp_normal: 55.0,
        temp_fan: 50.0,
        temp_alarm: 60.0,
        ..ThresholdConfig::default()
    };

    let err = app
        .handle_command(AppCommand::ApplyThresholds(candidate), &mut hw, &clock, &mut sink)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidOrdering {
            lower: ThresholdField::TempNormal,
            upper: ThresholdField::TempFan,
            ..
        })
    ));
    assert_eq!(app.thresholds(), before);
    assert!(app.change_log().is_empty());
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::ThresholdsRejected(_))),
        1
    );
}

#[test]
fn equal_thresholds_are_rejected() {
    let (mut app, mut hw, clock, mut sink) = make_app();
    let candidate = ThresholdConfig {
        temp_fan: 56.0,
        temp_alarm: 56.0,
        ..ThresholdConfig::default()
    };
    let result =
        app.handle_command(AppCommand::ApplyThresholds(candidate), &mut hw, &clock, &mut sink);
    assert!(result.is_err());
    assert_eq!(app.thresholds(), ThresholdConfig::default());
}

#[test]
fn applied_thresholds_drive_the_next_evaluation() {
    let (mut app, _, clock, mut sink) = make_app();
    let mut hw = MockHardware::steady(HOT_NIGHT);
    app.handle_command(AppCommand::StartAutomatic, &mut hw, &clock, &mut sink)
        .unwrap();
    run(&mut app, &mut hw, &clock, &mut sink, 3);
    assert!(app.actuators().buzzer_on);

    let raised = ThresholdConfig {
        temp_alarm: 60.0,
        ..ThresholdConfig::default()
    };
    app.handle_command(AppCommand::ApplyThresholds(raised), &mut hw, &clock, &mut sink)
        .unwrap();
    assert_eq!(app.thresholds(), raised);
    assert!(app.actuators().buzzer_on, "apply does not evaluate by itself");

    run(&mut app, &mut hw, &clock, &mut sink, 3);
    assert!(app.actuators().fan_on);
    assert!(!app.actuators().buzzer_on);
}

#[test]
fn apply_is_logged() {
    let (mut app, mut hw, clock, mut sink) = make_app();
    let next = ThresholdConfig {
        temp_normal: 45.0,
        ..ThresholdConfig::default()
    };
    app.handle_command(AppCommand::ApplyThresholds(next), &mut hw, &clock, &mut sink)
        .unwrap();
    assert_eq!(
        app.change_log().last().map(|e| e.event),
        Some(LogEvent::ThresholdsApplied(next))
    );
}

// ── Manual toggles ────────────────────────────────────────────

#[test]
fn toggle_flips_in_manual_mode() {
    let (mut app, mut hw, clock, mut sink) = make_app();
    app.handle_command(AppCommand::Toggle(Actuator::Fan), &mut hw, &clock, &mut sink)
        .unwrap();
    assert!(app.actuators().fan_on);
    assert!(hw.fan_on());

    app.handle_command(AppCommand::Toggle(Actuator::Fan), &mut hw, &clock, &mut sink)
        .unwrap();
    assert!(!app.actuators().fan_on);
    assert_eq!(
        sink.logged_messages(),
        ["Fan switched ON manually", "Fan switched OFF manually"]
    );
}

#[test]
fn toggle_servo_moves_to_open_angle() {
    let (mut app, mut hw, clock, mut sink) = make_app();
    app.handle_command(AppCommand::Toggle(Actuator::Servo), &mut hw, &clock, &mut sink)
        .unwrap();
    assert!(app.actuators().servo_open);
    assert_eq!(hw.servo_angle(), 90);
}

#[test]
fn toggle_rejected_in_automatic_mode() {
    let (mut app, mut hw, clock, mut sink) = make_app();
    app.handle_command(AppCommand::StartAutomatic, &mut hw, &clock, &mut sink)
        .unwrap();
    let before = app.change_log().len();

    let err = app
        .handle_command(AppCommand::Toggle(Actuator::Valve), &mut hw, &clock, &mut sink)
        .unwrap_err();
    assert_eq!(err, Error::ManualOnly(Actuator::Valve));
    assert!(!app.actuators().valve_on);
    assert_eq!(app.change_log().len(), before);
}

// ── Change log ────────────────────────────────────────────────

#[test]
fn clear_log_in_either_mode() {
    let (mut app, _, clock, mut sink) = make_app();
    let mut hw = MockHardware::steady(HOT_NIGHT);
    app.handle_command(AppCommand::StartAutomatic, &mut hw, &clock, &mut sink)
        .unwrap();
    run(&mut app, &mut hw, &clock, &mut sink, 3);

    app.handle_command(AppCommand::ClearLog, &mut hw, &clock, &mut sink)
        .unwrap();
    assert!(app.change_log().is_empty());
    assert_eq!(app.actuators(), all_on(), "clearing leaves outputs alone");
    assert_eq!(sink.count(|e| *e == AppEvent::LogCleared), 1);

    app.handle_command(AppCommand::StopAutomatic, &mut hw, &clock, &mut sink)
        .unwrap();
    assert_eq!(app.change_log().len(), 1);

    app.handle_command(AppCommand::ClearLog, &mut hw, &clock, &mut sink)
        .unwrap();
    assert!(app.change_log().is_empty());
}

// ── Telemetry & status ────────────────────────────────────────

#[test]
fn telemetry_every_ten_ticks() {
    let (mut app, mut hw, clock, mut sink) = make_app();
    run(&mut app, &mut hw, &clock, &mut sink, 25);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Telemetry(_))), 2);
}

#[test]
fn status_report_follows_latest_reading() {
    let (mut app, _, clock, mut sink) = make_app();
    let mut hw = MockHardware::steady(HOT_NIGHT);
    app.tick(&mut hw, &clock, &mut sink);
    let report = app.status_report();
    assert!(report.is_alarm());
    assert!(report.moisture_line().starts_with("WET"));
    assert!(report.light_line().starts_with("NIGHT"));

    hw.set_reading(SensorReading {
        temperature: 53.0,
        ..COOL_DAY
    });
    app.tick(&mut hw, &clock, &mut sink);
    assert!(app.status_report().temperature_line().starts_with("HIGH"));
}
