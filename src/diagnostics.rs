//! Runtime counters for the detection loop.
//!
//! Collected by the [`DetectorService`](crate::app::service::DetectorService)
//! on every tick and dumped as JSON by the host runner on shutdown.

use serde::{Deserialize, Serialize};

use crate::app::events::{Decision, DetectionEvent, Outcome, SuppressReason};
use crate::error::{CollaboratorFault, Error};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeStats {
    pub ticks: u64,
    /// Ticks whose range reading was missing or unusable.
    pub invalid_readings: u64,
    pub triggers: u64,
    pub actuations: u64,
    pub cooldown_suppressed: u64,
    pub rate_limited: u64,
    pub display_faults: u64,
    pub event_log_faults: u64,
    pub actuator_faults: u64,
}

impl RuntimeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one classified sample.
    pub fn record_sample(&mut self, distance_cm: Option<f32>, event: &DetectionEvent) {
        self.ticks += 1;
        if !distance_cm.is_some_and(|d| d.is_finite() && d >= 0.0) {
            self.invalid_readings += 1;
        }
        if event.is_trigger() {
            self.triggers += 1;
        }
    }

    pub fn record_decision(&mut self, decision: &Decision) {
        match decision.outcome {
            Outcome::Actuated => self.actuations += 1,
            Outcome::Suppressed(SuppressReason::Cooldown) => self.cooldown_suppressed += 1,
            Outcome::Suppressed(SuppressReason::RateLimited) => self.rate_limited += 1,
            Outcome::Ignored => {}
        }
        if CollaboratorFault::Display.is_set(decision.faults) {
            self.display_faults += 1;
        }
        if CollaboratorFault::EventLog.is_set(decision.faults) {
            self.event_log_faults += 1;
        }
    }

    pub fn record_error(&mut self, error: &Error) {
        match error {
            Error::Actuator(_) => self.actuator_faults += 1,
        }
    }
}
