//! Host time adapter.
//!
//! Implements [`ClockPort`] for the host runner:
//!
//! - monotonic seconds from `std::time::Instant` (origin = construction),
//! - wall time from `chrono::Local`.
//!
//! The monotonic origin is offset by the current wall-clock second within
//! the minute, so the gate's minute buckets line up with calendar minutes
//! the way they do on the device's RTC.

use std::time::Instant;

use chrono::{DateTime, Datelike, Local, Timelike};

use crate::app::events::WallTime;
use crate::app::ports::ClockPort;

/// Time adapter for the host runner.
pub struct HostClock {
    start: Instant,
    origin_secs: f64,
}

impl Default for HostClock {
    fn default() -> Self {
        Self::new()
    }
}

impl HostClock {
    pub fn new() -> Self {
        let now = Local::now();
        Self {
            start: Instant::now(),
            origin_secs: f64::from(now.second()) + f64::from(now.nanosecond() % 1_000_000_000) / 1e9,
        }
    }

    /// Seconds since construction.
    pub fn uptime_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

impl ClockPort for HostClock {
    fn now_monotonic(&self) -> f64 {
        self.origin_secs + self.uptime_secs()
    }

    fn now_wall(&self) -> WallTime {
        wall_time(&Local::now())
    }
}

/// Convert a chrono timestamp into the controller's calendar type.
pub fn wall_time(t: &DateTime<Local>) -> WallTime {
    WallTime {
        year: t.year(),
        month: t.month() as u8,
        day: t.day() as u8,
        hour: t.hour() as u8,
        minute: t.minute() as u8,
        second: t.second() as u8,
    }
}
