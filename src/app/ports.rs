//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DetectorService (domain)
//! ```
//!
//! Driven adapters (sensors, relay, display, event log, clock) implement
//! these traits.  The [`DetectorService`](super::service::DetectorService)
//! and [`ActuationController`](crate::control::actuation::ActuationController)
//! consume them via generics, so the domain core never touches hardware
//! directly.
//!
//! ## Safety notes
//!
//! - **ActuatorPort** implementations MUST be idempotent: `set(false)` on an
//!   already-off relay is a no-op, not an error.
//! - **DisplayPort** and **EventLogPort** are best-effort.  Their errors are
//!   reported, never allowed to block actuation.

use core::time::Duration;

use crate::config::ControllerConfig;
use crate::error::{ActuatorError, DisplayError, EventLogError};

use super::events::{DetectionRecord, Mood, WallTime};

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Binary presence detector (PIR).
pub trait PresenceSensor {
    fn read_presence(&mut self) -> bool;
}

/// Distance ranger.  `None` signals an invalid or out-of-range reading.
pub trait RangeSensor {
    fn read_distance_cm(&mut self) -> Option<f32>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the pump relay.
pub trait ActuatorPort {
    /// Energise (`true`) or release (`false`) the pump.
    fn set(&mut self, on: bool) -> Result<(), ActuatorError>;

    /// Whether the pump is currently energised.
    fn is_on(&self) -> bool;
}

/// Suspension point used while the pump is held on.
///
/// Implementations yield to the executor for `duration`; dropping the
/// returned future must be harmless.
#[allow(async_fn_in_trait)]
pub trait DelayPort {
    async fn delay(&mut self, duration: Duration);
}

// ───────────────────────────────────────────────────────────────
// Reporting ports (driven adapter: domain → user / logging)
// ───────────────────────────────────────────────────────────────

/// Status screen.  Renders only; no business logic.
pub trait DisplayPort {
    fn show_status(&mut self, mood: Mood, last_detection: &str) -> Result<(), DisplayError>;

    fn show_error(&mut self, message: &str) -> Result<(), DisplayError>;
}

/// Append-only detection log.
pub trait EventLogPort {
    fn append(&mut self, record: &DetectionRecord) -> Result<(), EventLogError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Injected time source so the gate can be driven deterministically.
pub trait ClockPort {
    /// Monotonic seconds since an arbitrary origin.
    fn now_monotonic(&self) -> f64;

    /// Calendar time for log records.
    fn now_wall(&self) -> WallTime;
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads configuration once at startup.
///
/// Implementations MUST run [`ControllerConfig::validate`] before handing
/// the config out.  Invalid ranges are rejected with
/// [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigPort {
    /// Returns [`ControllerConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<ControllerConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
