//! Domain values flowing through one detection tick.
//!
//! The classifier produces a [`DetectionEvent`]; the controller turns it
//! into a [`Decision`].  Actuations are recorded as [`DetectionRecord`]s
//! through the [`EventLogPort`](super::ports::EventLogPort).

use core::fmt;

/// Result of classifying one (presence, distance) sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectionEvent {
    /// No presence, or presence outside the qualifying distance band.
    None,
    /// Presence in band, but not enough movement to count as a cat.
    Idle(f32),
    /// Presence in band with cat-like movement across the sample window.
    Trigger(f32),
}

impl DetectionEvent {
    pub fn is_trigger(&self) -> bool {
        matches!(self, Self::Trigger(_))
    }
}

/// Why a trigger did not actuate the pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    /// Too soon after the previous activation.  Not surfaced to the user.
    Cooldown,
    /// Per-minute cap reached.  Shown on the display.
    RateLimited,
}

/// What the controller did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Actuated,
    Suppressed(SuppressReason),
    Ignored,
}

/// Outcome plus the best-effort collaborator faults seen on the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub outcome: Outcome,
    /// [`CollaboratorFault`](crate::error::CollaboratorFault) bitmask.
    pub faults: u8,
}

/// Face shown on the status screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Watching,
    Angry,
}

impl Mood {
    pub fn label(self) -> &'static str {
        match self {
            Self::Watching => "watching",
            Self::Angry => "angry",
        }
    }

    pub fn face(self) -> &'static str {
        match self {
            Self::Watching => "^_^",
            Self::Angry => ">_<",
        }
    }
}

/// Calendar timestamp used for log records and the last-detection label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallTime {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl WallTime {
    /// `HH:MM`, as shown after "Last:" on the status screen.
    pub fn hhmm(&self) -> heapless::String<8> {
        let mut s = heapless::String::new();
        // 5 chars always fit.
        let _ = fmt::write(&mut s, format_args!("{:02}:{:02}", self.hour, self.minute));
        s
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{} {}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Kind tag written in front of every event log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    CatDetected,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CatDetected => "Cat Detected",
        }
    }
}

/// One structured event log entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionRecord {
    pub kind: RecordKind,
    pub distance_cm: f32,
    pub presence: bool,
    pub timestamp: WallTime,
}

impl fmt::Display for DetectionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}, Distance: {:.2}cm, PIR: {}",
            self.timestamp,
            self.kind.as_str(),
            self.distance_cm,
            u8::from(self.presence)
        )
    }
}
