//! Fuzz target: `DetectorService::tick`
//!
//! Each 4-byte chunk becomes one tick: presence bit, a distance (or an
//! invalid reading) and a time step.  The loop runs against an in-memory
//! board and checks:
//! - No panics under any byte sequence
//! - The pump is off after every tick
//! - Activations per minute bucket never exceed the cap
//! - Two activations are always more than the cooldown apart
//!
//! cargo fuzz run fuzz_detection_loop

#![no_main]

use core::time::Duration;

use catdeterrent::app::events::{DetectionRecord, Mood, Outcome, WallTime};
use catdeterrent::app::ports::{
    ActuatorPort, ClockPort, DelayPort, DisplayPort, EventLogPort, PresenceSensor, RangeSensor,
};
use catdeterrent::app::service::DetectorService;
use catdeterrent::config::ControllerConfig;
use catdeterrent::error::{ActuatorError, DisplayError, EventLogError};
use libfuzzer_sys::fuzz_target;

// ── In-memory board ───────────────────────────────────────────

#[derive(Default)]
struct FuzzBoard {
    presence: bool,
    distance: Option<f32>,
    now: f64,
    pump: bool,
}

impl PresenceSensor for FuzzBoard {
    fn read_presence(&mut self) -> bool {
        self.presence
    }
}

impl RangeSensor for FuzzBoard {
    fn read_distance_cm(&mut self) -> Option<f32> {
        self.distance
    }
}

impl ActuatorPort for FuzzBoard {
    fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.pump = on;
        Ok(())
    }

    fn is_on(&self) -> bool {
        self.pump
    }
}

impl DelayPort for FuzzBoard {
    async fn delay(&mut self, duration: Duration) {
        self.now += duration.as_secs_f64();
    }
}

impl DisplayPort for FuzzBoard {
    fn show_status(&mut self, _mood: Mood, _last: &str) -> Result<(), DisplayError> {
        Ok(())
    }

    fn show_error(&mut self, _message: &str) -> Result<(), DisplayError> {
        Ok(())
    }
}

impl EventLogPort for FuzzBoard {
    fn append(&mut self, _record: &DetectionRecord) -> Result<(), EventLogError> {
        Ok(())
    }
}

impl ClockPort for FuzzBoard {
    fn now_monotonic(&self) -> f64 {
        self.now
    }

    fn now_wall(&self) -> WallTime {
        WallTime::default()
    }
}

fn distance(b: u8, c: u8) -> Option<f32> {
    match b {
        0 => None,
        1 => Some(f32::NAN),
        2 => Some(-f32::from(c)),
        _ => Some(f32::from(b) * 0.5 + f32::from(c) / 256.0),
    }
}

fuzz_target!(|data: &[u8]| {
    let config = ControllerConfig::default();
    let cooldown = f64::from(config.cooldown_period_secs);
    let cap = config.max_activations_per_minute;

    let mut service = DetectorService::new(&config);
    let mut board = FuzzBoard::default();
    let mut fired: Vec<f64> = Vec::new();

    for chunk in data.chunks_exact(4) {
        board.presence = chunk[0] & 1 == 1;
        board.distance = distance(chunk[1], chunk[2]);
        let started = board.now;

        let decision = futures_lite::future::block_on(service.tick(&mut board))
            .expect("in-memory board never fails");

        assert!(!board.pump, "pump left on after tick");
        if decision.outcome == Outcome::Actuated {
            fired.push(started);
        }
        assert!(service.controller().activation_state().activation_count <= cap);

        board.now += f64::from(chunk[3]) / 16.0;
    }

    for pair in fired.windows(2) {
        assert!(pair[1] - pair[0] > cooldown, "cooldown violated");
    }
    for (i, t) in fired.iter().enumerate() {
        let minute = (t / 60.0).floor();
        let same = fired[i..]
            .iter()
            .take_while(|u| (*u / 60.0).floor() == minute)
            .count();
        assert!(same as u32 <= cap, "cap exceeded in minute {minute}");
    }
});
