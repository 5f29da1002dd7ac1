//! Pump activation safety gate.
//!
//! Two independent limits protect the pump and the water reservoir:
//!
//! 1. **Cooldown**: an activation is only allowed if more than
//!    `cooldown_period_secs` have passed since the previous one started.
//! 2. **Rate limit**: at most `max_activations_per_minute` activations
//!    per calendar-minute bucket (`floor(now / 60)`).
//!
//! ## Gate lifecycle
//!
//! 1. Every trigger calls [`RateGate::evaluate`].  The minute bucket is
//!    rolled over first, unconditionally, so the count never carries
//!    across a boundary.
//! 2. If the verdict is [`GateVerdict::Clear`], the controller records the
//!    activation with [`RateGate::record_activation`] *before* energising
//!    the pump.
//! 3. A minute rollover resets the count but not the last activation
//!    time: the first trigger of a new bucket can still be held back by
//!    the cooldown.

use log::{debug, warn};

use crate::config::ControllerConfig;

/// Result of asking the gate whether the pump may run now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateVerdict {
    Clear,
    /// Cooldown still running; count is under the cap.
    Cooldown,
    /// Per-minute cap reached (regardless of cooldown).
    RateLimited,
}

/// Safety-critical activation bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivationState {
    /// Monotonic start time of the previous activation; `None` = never.
    pub last_activation: Option<f64>,
    /// Activations in `current_minute`.
    pub activation_count: u32,
    /// Minute bucket the count belongs to.
    pub current_minute: i64,
}

impl ActivationState {
    const fn new() -> Self {
        Self {
            last_activation: None,
            activation_count: 0,
            current_minute: 0,
        }
    }
}

/// Cooldown + per-minute cap.  Exclusively owned by the controller.
pub struct RateGate {
    cooldown_secs: f64,
    max_per_minute: u32,
    state: ActivationState,
}

impl RateGate {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            cooldown_secs: f64::from(config.cooldown_period_secs),
            max_per_minute: config.max_activations_per_minute,
            state: ActivationState::new(),
        }
    }

    /// Roll the minute bucket, then decide whether an activation at `now`
    /// is allowed.  Only the rollover mutates state.
    pub fn evaluate(&mut self, now: f64) -> GateVerdict {
        self.roll_minute(now);

        if self.state.activation_count >= self.max_per_minute {
            warn!(
                "GATE | rate limit: {} activations in minute {}",
                self.state.activation_count, self.state.current_minute
            );
            return GateVerdict::RateLimited;
        }

        let cooled = match self.state.last_activation {
            None => true,
            Some(last) => now - last > self.cooldown_secs,
        };
        if cooled {
            GateVerdict::Clear
        } else {
            debug!("GATE | cooldown active");
            GateVerdict::Cooldown
        }
    }

    /// Record an activation starting at `now`.
    pub fn record_activation(&mut self, now: f64) {
        self.roll_minute(now);
        self.state.last_activation = Some(now);
        self.state.activation_count = self.state.activation_count.saturating_add(1);
    }

    /// Read-only snapshot.
    pub fn state(&self) -> ActivationState {
        self.state
    }

    // ── Internal ──────────────────────────────────────────────────

    fn roll_minute(&mut self, now: f64) {
        let minute = (now / 60.0).floor() as i64;
        if minute != self.state.current_minute {
            if self.state.activation_count > 0 {
                debug!(
                    "GATE | minute {} -> {}, count {} reset",
                    self.state.current_minute, minute, self.state.activation_count
                );
            }
            self.state.current_minute = minute;
            self.state.activation_count = 0;
        }
    }
}
