//! Integration tests: DetectorService tick → classifier → controller.

use catdeterrent::app::events::{Mood, Outcome, SuppressReason};
use catdeterrent::app::service::DetectorService;
use catdeterrent::config::ControllerConfig;
use futures_lite::future::block_on;

use crate::mock_hw::{Call, MockHw};

fn run(service: &mut DetectorService, hw: &mut MockHw, ticks: usize) -> Vec<Outcome> {
    (0..ticks)
        .map(|_| {
            let d = block_on(service.tick(hw)).unwrap();
            hw.monotonic += 0.1;
            d.outcome
        })
        .collect()
}

#[test]
fn presence_is_read_before_range() {
    let mut svc = DetectorService::new(&ControllerConfig::default());
    let mut hw = MockHw::with_samples(&[(false, Some(250.0))]);
    run(&mut svc, &mut hw, 1);
    assert_eq!(hw.calls[0], Call::ReadPresence);
    assert_eq!(hw.calls[1], Call::ReadRange);
}

#[test]
fn darting_cat_fires_once_then_cools_down() {
    let mut svc = DetectorService::new(&ControllerConfig::default());
    let mut hw = MockHw::with_samples(&[
        (true, Some(95.0)),
        (true, Some(80.0)),
        (true, Some(62.0)),
        (true, Some(45.0)),
    ]);

    let outcomes = run(&mut svc, &mut hw, 4);
    assert_eq!(
        outcomes,
        vec![
            Outcome::Ignored,
            Outcome::Ignored,
            Outcome::Actuated,
            Outcome::Suppressed(SuppressReason::Cooldown),
        ]
    );
    assert_eq!(hw.records().len(), 1);
    assert_eq!(hw.records()[0].distance_cm, 62.0);

    let stats = svc.stats();
    assert_eq!(stats.ticks, 4);
    assert_eq!(stats.triggers, 2);
    assert_eq!(stats.actuations, 1);
    assert_eq!(stats.cooldown_suppressed, 1);
}

#[test]
fn movement_without_presence_never_fires() {
    let mut svc = DetectorService::new(&ControllerConfig::default());
    let mut hw = MockHw::with_samples(&[
        (false, Some(95.0)),
        (false, Some(15.0)),
        (false, Some(90.0)),
        (false, Some(12.0)),
    ]);

    let outcomes = run(&mut svc, &mut hw, 4);
    assert!(outcomes.iter().all(|o| *o == Outcome::Ignored));
    assert!(hw.pump_history().is_empty());
    assert_eq!(hw.last_status().map(|s| s.0), Some(Mood::Watching));
    assert_eq!(svc.stats().triggers, 0);
}

#[test]
fn out_of_band_readings_feed_window_but_never_fire() {
    let mut svc = DetectorService::new(&ControllerConfig::default());
    let mut hw = MockHw::with_samples(&[
        (true, Some(150.0)),
        (true, Some(5.0)),
        (true, Some(100.0)),
        // Back in band: spread over the window is 145 cm.
        (true, Some(50.0)),
    ]);

    let outcomes = run(&mut svc, &mut hw, 4);
    assert_eq!(&outcomes[..3], &[Outcome::Ignored; 3]);
    assert_eq!(outcomes[3], Outcome::Actuated);
    assert_eq!(svc.classifier().window().len(), 4);
}

#[test]
fn lower_band_edge_is_inclusive() {
    let mut svc = DetectorService::new(&ControllerConfig::default());
    let mut hw = MockHw::with_samples(&[(true, Some(40.0)), (true, Some(10.0))]);
    let outcomes = run(&mut svc, &mut hw, 2);
    assert_eq!(outcomes[1], Outcome::Actuated);
}

#[test]
fn invalid_readings_are_counted_and_skipped() {
    let mut svc = DetectorService::new(&ControllerConfig::default());
    let mut hw = MockHw::with_samples(&[
        (true, None),
        (true, Some(f32::NAN)),
        (true, Some(-3.0)),
        (true, Some(40.0)),
    ]);

    let outcomes = run(&mut svc, &mut hw, 4);
    assert!(outcomes.iter().all(|o| *o == Outcome::Ignored));
    assert_eq!(svc.stats().invalid_readings, 3);
    assert_eq!(svc.classifier().window().len(), 1);
}

#[test]
fn actuator_failure_is_returned_and_counted() {
    let mut svc = DetectorService::new(&ControllerConfig::default());
    let mut hw = MockHw::with_samples(&[(true, Some(90.0)), (true, Some(30.0))]);
    hw.fail_energise = true;

    assert!(block_on(svc.tick(&mut hw)).is_ok());
    assert!(block_on(svc.tick(&mut hw)).is_err());
    assert!(!hw.pump_on);
    assert_eq!(svc.stats().actuator_faults, 1);
    assert_eq!(svc.controller().activation_state().activation_count, 1);
}

#[test]
fn tight_config_rate_limits_after_cap() {
    let config = ControllerConfig {
        cooldown_period_secs: 0,
        max_activations_per_minute: 2,
        ..ControllerConfig::default()
    };
    let mut svc = DetectorService::new(&config);
    let samples: Vec<_> = [90.0, 20.0, 90.0, 20.0]
        .iter()
        .map(|d| (true, Some(*d)))
        .collect();
    let mut hw = MockHw::with_samples(&samples);

    let outcomes = run(&mut svc, &mut hw, 4);
    assert_eq!(
        outcomes,
        vec![
            Outcome::Ignored,
            Outcome::Actuated,
            Outcome::Actuated,
            Outcome::Suppressed(SuppressReason::RateLimited),
        ]
    );
    assert_eq!(svc.stats().rate_limited, 1);
    assert_eq!(hw.errors_shown().len(), 1);
}
