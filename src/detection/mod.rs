//! Sensor fusion: turns (presence, distance) samples into detection events.
//!
//! The [`FusionClassifier`](classifier::FusionClassifier) owns a short
//! [`SampleWindow`](window::SampleWindow) of recent distances and uses its
//! max−min spread as a movement signal.  A cat walking past the ranger
//! makes the distance jump; a person standing still or a static object
//! does not.

pub mod classifier;
pub mod window;

pub use classifier::FusionClassifier;
pub use window::SampleWindow;
