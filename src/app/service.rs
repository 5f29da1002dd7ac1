//! Application service: the hexagonal core.
//!
//! [`DetectorService`] owns the fusion classifier, the actuation
//! controller, and the runtime counters.  All I/O flows through port
//! traits passed in at call sites, making the whole loop testable with
//! mock adapters.
//!
//! ```text
//!  PresenceSensor ──▶ ┌──────────────────────────┐ ──▶ DisplayPort
//!  RangeSensor    ──▶ │     DetectorService       │ ──▶ EventLogPort
//!  ClockPort      ──▶ │  Classifier · RateGate    │ ──▶ ActuatorPort
//!                     └──────────────────────────┘
//! ```

use log::error;

use crate::config::ControllerConfig;
use crate::control::actuation::{ActuationController, Timestamp};
use crate::detection::FusionClassifier;
use crate::diagnostics::RuntimeStats;
use crate::error::Result;

use super::events::Decision;
use super::ports::{
    ActuatorPort, ClockPort, DelayPort, DisplayPort, EventLogPort, PresenceSensor, RangeSensor,
};

/// The detection service.  One instance per sampling loop.
pub struct DetectorService {
    classifier: FusionClassifier,
    controller: ActuationController,
    stats: RuntimeStats,
}

impl DetectorService {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            classifier: FusionClassifier::new(config),
            controller: ActuationController::new(config),
            stats: RuntimeStats::new(),
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full cycle: read sensors → classify → gate → actuate.
    ///
    /// Presence is read before range.  The `io` parameter satisfies every
    /// port at once; see [`Board`](crate::adapters::board::Board).
    pub async fn tick<IO>(&mut self, io: &mut IO) -> Result<Decision>
    where
        IO: PresenceSensor
            + RangeSensor
            + ClockPort
            + ActuatorPort
            + DelayPort
            + DisplayPort
            + EventLogPort,
    {
        let presence = io.read_presence();
        let distance = io.read_distance_cm();
        let now = Timestamp {
            monotonic_secs: io.now_monotonic(),
            wall: io.now_wall(),
        };

        let event = self.classifier.classify(presence, distance);
        self.stats.record_sample(distance, &event);

        match self.controller.handle(event, now, io).await {
            Ok(decision) => {
                self.stats.record_decision(&decision);
                Ok(decision)
            }
            Err(e) => {
                error!("DETECT | tick failed: {}", e);
                self.stats.record_error(&e);
                Err(e)
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn stats(&self) -> &RuntimeStats {
        &self.stats
    }

    pub fn controller(&self) -> &ActuationController {
        &self.controller
    }

    pub fn classifier(&self) -> &FusionClassifier {
        &self.classifier
    }
}
