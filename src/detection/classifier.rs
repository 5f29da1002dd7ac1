//! Presence + range fusion classifier.

use log::debug;

use crate::app::events::DetectionEvent;
use crate::config::ControllerConfig;

use super::window::SampleWindow;

/// Stateful classifier.  Call [`classify`](Self::classify) once per tick.
pub struct FusionClassifier {
    window: SampleWindow,
    min_distance_cm: f32,
    max_distance_cm: f32,
    movement_threshold_cm: f32,
}

impl FusionClassifier {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            window: SampleWindow::new(config.window_capacity),
            min_distance_cm: config.min_distance_cm,
            max_distance_cm: config.max_distance_cm,
            movement_threshold_cm: config.movement_threshold_cm,
        }
    }

    /// Fold one sample into the window and classify it.
    ///
    /// Every valid distance enters the window, including ones outside the
    /// qualifying band, so the spread reflects what the ranger actually saw.
    /// Invalid readings (missing, NaN, negative) leave the window untouched
    /// and can never trigger.
    pub fn classify(&mut self, presence: bool, distance_cm: Option<f32>) -> DetectionEvent {
        let distance = distance_cm.filter(|d| d.is_finite() && *d >= 0.0);
        if let Some(d) = distance {
            self.window.push(d);
        }

        if !presence {
            return DetectionEvent::None;
        }
        let Some(d) = distance else {
            return DetectionEvent::None;
        };
        let in_band = d >= self.min_distance_cm && d < self.max_distance_cm;
        if !in_band {
            return DetectionEvent::None;
        }

        match self.window.spread() {
            Some(spread) if spread > self.movement_threshold_cm => {
                debug!("DETECT | trigger at {:.1}cm (spread {:.1}cm)", d, spread);
                DetectionEvent::Trigger(d)
            }
            _ => DetectionEvent::Idle(d),
        }
    }

    /// Read-only view of the recent readings.
    pub fn window(&self) -> &SampleWindow {
        &self.window
    }
}
