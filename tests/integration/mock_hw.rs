//! Mock hardware adapter for integration tests.
//!
//! Records every port call so tests can assert on the full command
//! history without touching real GPIO.  Sensor samples are scripted;
//! time only moves when a test (or a pump hold) moves it.

use core::time::Duration;
use std::collections::VecDeque;

use catdeterrent::app::events::{DetectionRecord, Mood, WallTime};
use catdeterrent::app::ports::{
    ActuatorPort, ClockPort, DelayPort, DisplayPort, EventLogPort, PresenceSensor, RangeSensor,
};
use catdeterrent::control::actuation::Timestamp;
use catdeterrent::error::{ActuatorError, DisplayError, EventLogError};

// ── Call record ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ReadPresence,
    ReadRange,
    SetPump(bool),
    Delay(Duration),
    Status { mood: Mood, last: String },
    Error(String),
    Append(DetectionRecord),
}

// ── MockHw ────────────────────────────────────────────────────

pub struct MockHw {
    pub calls: Vec<Call>,
    /// (presence, distance) per tick; presence is peeked, range pops.
    pub samples: VecDeque<(bool, Option<f32>)>,
    pub monotonic: f64,
    pub wall: WallTime,
    pub pump_on: bool,
    /// `set(true)` fails.
    pub fail_energise: bool,
    /// `set(false)` succeeds but the relay stays closed.
    pub stuck_on: bool,
    pub fail_display: bool,
    pub fail_log: bool,
    /// The pump hold never completes.
    pub hang_delay: bool,
}

#[allow(dead_code)]
impl MockHw {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            samples: VecDeque::new(),
            monotonic: 0.0,
            wall: wall(21, 7),
            pump_on: false,
            fail_energise: false,
            stuck_on: false,
            fail_display: false,
            fail_log: false,
            hang_delay: false,
        }
    }

    pub fn with_samples(samples: &[(bool, Option<f32>)]) -> Self {
        let mut hw = Self::new();
        hw.samples = samples.iter().copied().collect();
        hw
    }

    /// Relay commands in order.
    pub fn pump_history(&self) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::SetPump(on) => Some(*on),
                _ => None,
            })
            .collect()
    }

    pub fn records(&self) -> Vec<DetectionRecord> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Append(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    pub fn errors_shown(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Error(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_status(&self) -> Option<(Mood, String)> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Status { mood, last } => Some((*mood, last.clone())),
            _ => None,
        })
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl Default for MockHw {
    fn default() -> Self {
        Self::new()
    }
}

pub fn wall(hour: u8, minute: u8) -> WallTime {
    WallTime {
        year: 2026,
        month: 10,
        day: 19,
        hour,
        minute,
        second: 0,
    }
}

/// Timestamp at monotonic `secs`, wall clock fixed at 21:07.
pub fn at(secs: f64) -> Timestamp {
    Timestamp {
        monotonic_secs: secs,
        wall: wall(21, 7),
    }
}

// ── Port impls ────────────────────────────────────────────────

impl PresenceSensor for MockHw {
    fn read_presence(&mut self) -> bool {
        self.calls.push(Call::ReadPresence);
        self.samples.front().is_some_and(|s| s.0)
    }
}

impl RangeSensor for MockHw {
    fn read_distance_cm(&mut self) -> Option<f32> {
        self.calls.push(Call::ReadRange);
        self.samples.pop_front().and_then(|s| s.1)
    }
}

impl ActuatorPort for MockHw {
    fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.calls.push(Call::SetPump(on));
        if on && self.fail_energise {
            return Err(ActuatorError::GpioWriteFailed);
        }
        if !on && self.stuck_on {
            return Ok(());
        }
        self.pump_on = on;
        Ok(())
    }

    fn is_on(&self) -> bool {
        self.pump_on
    }
}

impl DelayPort for MockHw {
    async fn delay(&mut self, duration: Duration) {
        self.calls.push(Call::Delay(duration));
        if self.hang_delay {
            futures_lite::future::pending::<()>().await;
        }
        self.monotonic += duration.as_secs_f64();
    }
}

impl DisplayPort for MockHw {
    fn show_status(&mut self, mood: Mood, last_detection: &str) -> Result<(), DisplayError> {
        self.calls.push(Call::Status {
            mood,
            last: last_detection.to_string(),
        });
        if self.fail_display {
            Err(DisplayError::BusWriteFailed)
        } else {
            Ok(())
        }
    }

    fn show_error(&mut self, message: &str) -> Result<(), DisplayError> {
        self.calls.push(Call::Error(message.to_string()));
        if self.fail_display {
            Err(DisplayError::BusWriteFailed)
        } else {
            Ok(())
        }
    }
}

impl EventLogPort for MockHw {
    fn append(&mut self, record: &DetectionRecord) -> Result<(), EventLogError> {
        self.calls.push(Call::Append(*record));
        if self.fail_log {
            Err(EventLogError::IoError)
        } else {
            Ok(())
        }
    }
}

impl ClockPort for MockHw {
    fn now_monotonic(&self) -> f64 {
        self.monotonic
    }

    fn now_wall(&self) -> WallTime {
        self.wall
    }
}
