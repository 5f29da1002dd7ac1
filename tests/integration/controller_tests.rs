//! Integration tests: ActuationController → RateGate → PumpGuard.

use core::time::Duration;

use catdeterrent::app::events::{DetectionEvent, Mood, Outcome, RecordKind, SuppressReason};
use catdeterrent::config::ControllerConfig;
use catdeterrent::control::actuation::{ActuationController, RATE_LIMIT_MESSAGE, Timestamp};
use catdeterrent::error::{ActuatorError, CollaboratorFault, Error};
use futures_lite::future::{block_on, poll_once};

use crate::mock_hw::{Call, MockHw, at, wall};

fn controller() -> ActuationController {
    ActuationController::new(&ControllerConfig::default())
}

fn trigger(c: &mut ActuationController, hw: &mut MockHw, secs: f64) -> Outcome {
    block_on(c.handle(DetectionEvent::Trigger(42.0), at(secs), hw))
        .unwrap()
        .outcome
}

// ── Non-trigger events ────────────────────────────────────────

#[test]
fn none_and_idle_only_redraw_watching() {
    let mut c = controller();
    let mut hw = MockHw::new();

    for event in [DetectionEvent::None, DetectionEvent::Idle(40.0)] {
        let d = block_on(c.handle(event, at(30.0), &mut hw)).unwrap();
        assert_eq!(d.outcome, Outcome::Ignored);
        assert_eq!(d.faults, 0);
    }

    assert!(hw.pump_history().is_empty());
    assert!(hw.records().is_empty());
    assert_eq!(hw.last_status(), Some((Mood::Watching, "Never".to_string())));
    let s = c.activation_state();
    assert_eq!(s.last_activation, None);
    assert_eq!(s.activation_count, 0);
    assert_eq!(c.last_detection(), "Never");
}

// ── Actuation ─────────────────────────────────────────────────

#[test]
fn first_trigger_fires_pump_for_configured_hold() {
    let mut c = controller();
    let mut hw = MockHw::new();

    assert_eq!(trigger(&mut c, &mut hw, 100.0), Outcome::Actuated);

    assert_eq!(
        hw.calls,
        vec![
            Call::Status {
                mood: Mood::Angry,
                last: "Never".to_string()
            },
            Call::SetPump(true),
            Call::Delay(Duration::from_secs(2)),
            Call::SetPump(false),
            Call::Append(hw.records()[0]),
        ]
    );
    let r = hw.records()[0];
    assert_eq!(r.kind, RecordKind::CatDetected);
    assert_eq!(r.distance_cm, 42.0);
    assert!(r.presence);
    assert_eq!(r.timestamp, wall(21, 7));

    assert!(!hw.pump_on);
    assert_eq!(c.last_detection(), "21:07");
    let s = c.activation_state();
    assert_eq!(s.last_activation, Some(100.0));
    assert_eq!(s.activation_count, 1);
    assert_eq!(s.current_minute, 1);
}

#[test]
fn relay_left_on_is_forced_off_before_pulse() {
    let mut c = controller();
    let mut hw = MockHw::new();
    hw.pump_on = true;

    assert_eq!(trigger(&mut c, &mut hw, 10.0), Outcome::Actuated);
    assert_eq!(hw.pump_history(), vec![false, true, false]);
}

// ── Cooldown ──────────────────────────────────────────────────

#[test]
fn cooldown_suppresses_silently() {
    let mut c = controller();
    let mut hw = MockHw::new();

    assert_eq!(trigger(&mut c, &mut hw, 100.0), Outcome::Actuated);
    hw.clear_calls();

    // Exactly the cooldown period is still too soon.
    assert_eq!(
        trigger(&mut c, &mut hw, 105.0),
        Outcome::Suppressed(SuppressReason::Cooldown)
    );
    assert!(hw.pump_history().is_empty());
    assert!(hw.errors_shown().is_empty());
    assert!(hw.records().is_empty());
    assert_eq!(c.activation_state().last_activation, Some(100.0));

    assert_eq!(trigger(&mut c, &mut hw, 105.5), Outcome::Actuated);
    assert_eq!(c.activation_state().activation_count, 2);
}

#[test]
fn second_trigger_two_seconds_later_is_held_back() {
    let mut c = controller();
    let mut hw = MockHw::new();

    assert_eq!(trigger(&mut c, &mut hw, 30.0), Outcome::Actuated);
    assert_eq!(
        trigger(&mut c, &mut hw, 32.0),
        Outcome::Suppressed(SuppressReason::Cooldown)
    );
    assert_eq!(hw.pump_history(), vec![true, false]);
    assert!(hw.errors_shown().is_empty());
}

#[test]
fn suppressed_trigger_still_updates_label() {
    let mut c = controller();
    let mut hw = MockHw::new();

    assert_eq!(trigger(&mut c, &mut hw, 100.0), Outcome::Actuated);
    let later = Timestamp {
        monotonic_secs: 101.0,
        wall: wall(21, 8),
    };
    let d = block_on(c.handle(DetectionEvent::Trigger(30.0), later, &mut hw)).unwrap();
    assert_eq!(d.outcome, Outcome::Suppressed(SuppressReason::Cooldown));
    assert_eq!(c.last_detection(), "21:08");
}

// ── Per-minute cap ────────────────────────────────────────────

/// Ten activations 5.5 s apart, all inside minute bucket 1.
fn fill_minute(c: &mut ActuationController, hw: &mut MockHw) {
    for i in 0..10 {
        let now = 60.0 + 5.5 * f64::from(i);
        assert_eq!(trigger(c, hw, now), Outcome::Actuated, "activation {i}");
    }
    assert_eq!(c.activation_state().activation_count, 10);
}

#[test]
fn eleventh_trigger_in_a_minute_is_rate_limited() {
    let mut c = controller();
    let mut hw = MockHw::new();
    fill_minute(&mut c, &mut hw);
    hw.clear_calls();

    assert_eq!(
        trigger(&mut c, &mut hw, 115.0),
        Outcome::Suppressed(SuppressReason::RateLimited)
    );
    assert_eq!(hw.errors_shown(), vec![RATE_LIMIT_MESSAGE.to_string()]);
    assert!(hw.pump_history().is_empty());
    assert_eq!(c.activation_state().activation_count, 10);
}

#[test]
fn rate_limit_wins_over_cooldown() {
    let mut c = controller();
    let mut hw = MockHw::new();
    fill_minute(&mut c, &mut hw);

    // 0.5 s after the last activation: both clauses fail.
    assert_eq!(
        trigger(&mut c, &mut hw, 110.0),
        Outcome::Suppressed(SuppressReason::RateLimited)
    );
}

#[test]
fn new_minute_resets_cap() {
    let mut c = controller();
    let mut hw = MockHw::new();
    fill_minute(&mut c, &mut hw);

    assert_eq!(trigger(&mut c, &mut hw, 120.0), Outcome::Actuated);
    let s = c.activation_state();
    assert_eq!(s.current_minute, 2);
    assert_eq!(s.activation_count, 1);
}

// ── Failures ──────────────────────────────────────────────────

#[test]
fn energise_failure_leaves_relay_off_and_counts_activation() {
    let mut c = controller();
    let mut hw = MockHw::new();
    hw.fail_energise = true;

    let res = block_on(c.handle(DetectionEvent::Trigger(50.0), at(10.0), &mut hw));
    assert_eq!(res, Err(Error::Actuator(ActuatorError::GpioWriteFailed)));
    assert!(!hw.pump_on);
    assert_eq!(hw.pump_history(), vec![true, false]);
    assert!(hw.records().is_empty());
    assert_eq!(c.activation_state().activation_count, 1);
    assert_eq!(c.activation_state().last_activation, Some(10.0));
}

#[test]
fn relay_that_will_not_open_is_reported_stuck() {
    let mut c = controller();
    let mut hw = MockHw::new();
    hw.stuck_on = true;

    let res = block_on(c.handle(DetectionEvent::Trigger(50.0), at(10.0), &mut hw));
    assert_eq!(res, Err(Error::Actuator(ActuatorError::StuckOn)));
    // Release attempt, then the guard's retry on drop.
    assert_eq!(hw.pump_history(), vec![true, false, false]);
}

#[test]
fn display_failure_does_not_block_actuation() {
    let mut c = controller();
    let mut hw = MockHw::new();
    hw.fail_display = true;

    let d = block_on(c.handle(DetectionEvent::Trigger(50.0), at(10.0), &mut hw)).unwrap();
    assert_eq!(d.outcome, Outcome::Actuated);
    assert!(CollaboratorFault::Display.is_set(d.faults));
    assert!(!CollaboratorFault::EventLog.is_set(d.faults));
    assert_eq!(hw.records().len(), 1);
}

#[test]
fn rate_limit_display_failure_is_reported_as_fault() {
    let mut c = controller();
    let mut hw = MockHw::new();
    fill_minute(&mut c, &mut hw);
    hw.fail_display = true;

    let d = block_on(c.handle(DetectionEvent::Trigger(50.0), at(115.0), &mut hw)).unwrap();
    assert_eq!(d.outcome, Outcome::Suppressed(SuppressReason::RateLimited));
    assert!(CollaboratorFault::Display.is_set(d.faults));
}

#[test]
fn log_failure_is_reported_as_fault() {
    let mut c = controller();
    let mut hw = MockHw::new();
    hw.fail_log = true;

    let d = block_on(c.handle(DetectionEvent::Trigger(50.0), at(10.0), &mut hw)).unwrap();
    assert_eq!(d.outcome, Outcome::Actuated);
    assert!(CollaboratorFault::EventLog.is_set(d.faults));
    assert!(!hw.pump_on);
}

// ── Cancellation ──────────────────────────────────────────────

#[test]
fn dropping_the_hold_turns_the_pump_off() {
    let mut c = controller();
    let mut hw = MockHw::new();
    hw.hang_delay = true;

    {
        let mut fut = Box::pin(c.handle(DetectionEvent::Trigger(50.0), at(10.0), &mut hw));
        assert!(block_on(poll_once(fut.as_mut())).is_none());
    }

    assert!(!hw.pump_on);
    assert_eq!(hw.pump_history(), vec![true, false]);
    assert!(hw.records().is_empty());
    assert_eq!(c.activation_state().activation_count, 1);
}
