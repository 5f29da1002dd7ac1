//! Board adapter: bundles every peripheral behind the domain port traits.
//!
//! [`DetectorService::tick`](crate::app::service::DetectorService::tick)
//! takes one `io` value that satisfies all ports.  `Board` is that value:
//! each field is an independent adapter, and each port impl forwards to
//! the matching field.

use core::time::Duration;

use crate::app::events::{DetectionRecord, Mood, WallTime};
use crate::app::ports::{
    ActuatorPort, ClockPort, DelayPort, DisplayPort, EventLogPort, PresenceSensor, RangeSensor,
};
use crate::error::{ActuatorError, DisplayError, EventLogError};

/// Concrete adapter that combines all peripherals behind port traits.
pub struct Board<P, R, A, D, L, H, C> {
    pub presence: P,
    pub range: R,
    pub pump: A,
    pub display: D,
    pub event_log: L,
    pub delay: H,
    pub clock: C,
}

// ── Sensor ports ──────────────────────────────────────────────

impl<P: PresenceSensor, R, A, D, L, H, C> PresenceSensor for Board<P, R, A, D, L, H, C> {
    fn read_presence(&mut self) -> bool {
        self.presence.read_presence()
    }
}

impl<P, R: RangeSensor, A, D, L, H, C> RangeSensor for Board<P, R, A, D, L, H, C> {
    fn read_distance_cm(&mut self) -> Option<f32> {
        self.range.read_distance_cm()
    }
}

// ── Actuator ports ────────────────────────────────────────────

impl<P, R, A: ActuatorPort, D, L, H, C> ActuatorPort for Board<P, R, A, D, L, H, C> {
    fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.pump.set(on)
    }

    fn is_on(&self) -> bool {
        self.pump.is_on()
    }
}

impl<P, R, A, D, L, H: DelayPort, C> DelayPort for Board<P, R, A, D, L, H, C> {
    async fn delay(&mut self, duration: Duration) {
        self.delay.delay(duration).await;
    }
}

// ── Reporting ports ───────────────────────────────────────────

impl<P, R, A, D: DisplayPort, L, H, C> DisplayPort for Board<P, R, A, D, L, H, C> {
    fn show_status(&mut self, mood: Mood, last_detection: &str) -> Result<(), DisplayError> {
        self.display.show_status(mood, last_detection)
    }

    fn show_error(&mut self, message: &str) -> Result<(), DisplayError> {
        self.display.show_error(message)
    }
}

impl<P, R, A, D, L: EventLogPort, H, C> EventLogPort for Board<P, R, A, D, L, H, C> {
    fn append(&mut self, record: &DetectionRecord) -> Result<(), EventLogError> {
        self.event_log.append(record)
    }
}

// ── Clock port ────────────────────────────────────────────────

impl<P, R, A, D, L, H, C: ClockPort> ClockPort for Board<P, R, A, D, L, H, C> {
    fn now_monotonic(&self) -> f64 {
        self.clock.now_monotonic()
    }

    fn now_wall(&self) -> WallTime {
        self.clock.now_wall()
    }
}
