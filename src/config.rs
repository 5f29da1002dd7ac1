//! Controller configuration parameters
//!
//! All tunable parameters for the detector and the pump safety gate.
//! Loaded once at startup through a [`ConfigPort`](crate::app::ports::ConfigPort)
//! and never mutated afterwards.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Upper bound on the sample window length (backing storage is fixed).
pub const MAX_WINDOW_CAPACITY: usize = 16;

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    // --- Pump ---
    /// How long the pump stays energised per activation (milliseconds)
    pub pump_on_duration_ms: u32,
    /// Minimum time between two activations (seconds)
    pub cooldown_period_secs: u32,
    /// Activation cap per calendar-minute bucket
    pub max_activations_per_minute: u32,

    // --- Detection ---
    /// Lower edge of the qualifying distance band (cm, inclusive)
    pub min_distance_cm: f32,
    /// Upper edge of the qualifying distance band (cm, exclusive)
    pub max_distance_cm: f32,
    /// Windowed max-min spread (cm) that counts as cat-like movement
    pub movement_threshold_cm: f32,
    /// Number of recent distance readings kept for the spread
    pub window_capacity: usize,

    // --- Timing ---
    /// Sampling loop period (milliseconds)
    pub sample_interval_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Pump
            pump_on_duration_ms: 2000,
            cooldown_period_secs: 5,
            max_activations_per_minute: 10,

            // Detection
            min_distance_cm: 10.0,
            max_distance_cm: 100.0,
            movement_threshold_cm: 20.0,
            window_capacity: 5,

            // Timing
            sample_interval_ms: 100, // 10 Hz
        }
    }
}

impl ControllerConfig {
    /// Reject values that would make the gate or the classifier meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pump_on_duration_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "pump_on_duration_ms must be non-zero",
            ));
        }
        if self.max_activations_per_minute == 0 {
            return Err(ConfigError::ValidationFailed(
                "max_activations_per_minute must be non-zero",
            ));
        }
        if !(self.min_distance_cm.is_finite() && self.max_distance_cm.is_finite())
            || self.min_distance_cm < 0.0
            || self.min_distance_cm >= self.max_distance_cm
        {
            return Err(ConfigError::ValidationFailed(
                "distance band must satisfy 0 <= min < max",
            ));
        }
        if !self.movement_threshold_cm.is_finite() || self.movement_threshold_cm < 0.0 {
            return Err(ConfigError::ValidationFailed(
                "movement_threshold_cm must be finite and non-negative",
            ));
        }
        if self.window_capacity == 0 || self.window_capacity > MAX_WINDOW_CAPACITY {
            return Err(ConfigError::ValidationFailed(
                "window_capacity must be within 1..=16",
            ));
        }
        if self.sample_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "sample_interval_ms must be non-zero",
            ));
        }
        Ok(())
    }

    pub fn pump_on_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.pump_on_duration_ms))
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.sample_interval_ms))
    }
}
