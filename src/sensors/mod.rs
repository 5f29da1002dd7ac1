//! Sensor drivers feeding the fusion classifier.
//!
//! | Driver               | Implements       | Source                       |
//! |----------------------|------------------|------------------------------|
//! | `PirSensor`          | PresenceSensor   | PIR module on a GPIO input   |
//! | `PlausibilityFilter` | RangeSensor      | Any [`RawRanger`](range::RawRanger) |
//!
//! Neither driver ever fails the loop: a bad read becomes "no presence" or
//! "no distance" and the tick goes on.

pub mod presence;
pub mod range;

pub use presence::PirSensor;
pub use range::{PlausibilityFilter, RawRanger};
