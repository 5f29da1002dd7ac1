//! Distance ranger plausibility filter.
//!
//! Echo decoding is the ranger driver's job.  This wrapper only decides
//! whether a measurement is worth feeding to the classifier: timeouts,
//! NaN, and anything outside the ranger's physical span become `None`.
//!
//! Readings past the far limit are indistinguishable from "no target";
//! both simply drop out of classification.

use log::debug;

use crate::app::ports::RangeSensor;
use crate::error::SensorError;

/// Closest distance an HC-SR04 style ranger resolves (cm).
pub const RANGER_MIN_CM: f32 = 2.0;

/// Farthest distance an HC-SR04 style ranger resolves (cm).
pub const RANGER_MAX_CM: f32 = 400.0;

/// Raw distance source (ultrasonic, ToF, simulation).
pub trait RawRanger {
    fn measure_cm(&mut self) -> Result<f32, SensorError>;
}

/// Wraps a [`RawRanger`] and implements [`RangeSensor`].
pub struct PlausibilityFilter<S> {
    source: S,
    min_cm: f32,
    max_cm: f32,
    rejected: u32,
}

impl<S: RawRanger> PlausibilityFilter<S> {
    pub fn new(source: S) -> Self {
        Self::with_limits(source, RANGER_MIN_CM, RANGER_MAX_CM)
    }

    pub fn with_limits(source: S, min_cm: f32, max_cm: f32) -> Self {
        Self {
            source,
            min_cm,
            max_cm,
            rejected: 0,
        }
    }

    /// Readings turned into `None` since construction.
    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    fn check(&self, raw: Result<f32, SensorError>) -> Result<f32, SensorError> {
        let cm = raw?;
        if cm.is_finite() && cm >= self.min_cm && cm <= self.max_cm {
            Ok(cm)
        } else {
            Err(SensorError::OutOfRange)
        }
    }
}

impl<S: RawRanger> RangeSensor for PlausibilityFilter<S> {
    fn read_distance_cm(&mut self) -> Option<f32> {
        let raw = self.source.measure_cm();
        match self.check(raw) {
            Ok(cm) => Some(cm),
            Err(e) => {
                debug!("RANGE | reading dropped: {}", e);
                self.rejected = self.rejected.saturating_add(1);
                None
            }
        }
    }
}
