//! Unified error types for the CatDeterrent controller.
//!
//! One small `Copy` enum per collaborator (sensor, actuator, display,
//! event log), returned by the port traits, plus the [`Error`] the
//! controller hands back to the sampling loop.  Nothing here allocates.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Failures the controller hands back to the sampling loop.
///
/// Only the actuator path is fatal to a tick.  Sensor faults are absorbed
/// into a non-trigger classification; display and event log faults are
/// folded into [`CollaboratorFault`] bits on the returned decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An actuator command failed.
    Actuator(ActuatorError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actuator(e) => write!(f, "actuator: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Actuator(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// GPIO read returned an error.
    GpioReadFailed,
    /// No echo came back before the ranger timed out.
    EchoTimeout,
    /// Reading is outside the physically plausible range.
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioReadFailed => write!(f, "GPIO read failed"),
            Self::EchoTimeout => write!(f, "echo timeout"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

impl std::error::Error for SensorError {}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// GPIO set failed.
    GpioWriteFailed,
    /// The actuator did not report the commanded state.
    StuckOn,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
            Self::StuckOn => write!(f, "actuator stuck on"),
        }
    }
}

impl std::error::Error for ActuatorError {}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Display / event log errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// Bus write to the panel failed.
    BusWriteFailed,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusWriteFailed => write!(f, "bus write failed"),
        }
    }
}

impl std::error::Error for DisplayError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLogError {
    /// Underlying writer returned an I/O error.
    IoError,
    /// Storage is full.
    Full,
}

impl fmt::Display for EventLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError => write!(f, "I/O error"),
            Self::Full => write!(f, "storage full"),
        }
    }
}

impl std::error::Error for EventLogError {}

// ---------------------------------------------------------------------------
// Collaborator faults
// ---------------------------------------------------------------------------

/// Best-effort collaborator failures observed while handling one event.
/// Accumulated in a bitmask so a single tick can report several at once
/// without touching the activation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CollaboratorFault {
    /// A status or error frame could not be shown.
    Display = 0b0000_0001,
    /// A detection record could not be appended.
    EventLog = 0b0000_0010,
}

impl CollaboratorFault {
    /// Return the bitmask for this fault.
    pub const fn mask(self) -> u8 {
        self as u8
    }

    /// True if `flags` carries this fault.
    pub const fn is_set(self, flags: u8) -> bool {
        flags & self.mask() != 0
    }
}

impl fmt::Display for CollaboratorFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Display => write!(f, "display"),
            Self::EventLog => write!(f, "event log"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
