//! Safety-gated pump controller.
//!
//! Takes a [`DetectionEvent`] and decides whether the pump runs.  The
//! pump-on span is a scoped acquisition: [`PumpGuard`] energises the relay
//! and releases it when dropped, so the pump is off on every exit path,
//! including when the caller drops the future mid-hold (shutdown).
//!
//! ```text
//!  Trigger ──▶ RateGate ──┬─ Clear ──▶ PumpGuard(on) ─ hold ─ off ──▶ Actuated
//!                         ├─ Cooldown ───────────────────────────────▶ Suppressed (silent)
//!                         └─ RateLimited ─ show_error ───────────────▶ Suppressed
//! ```

use core::time::Duration;

use log::{error, info, warn};

use crate::app::events::{
    Decision, DetectionEvent, DetectionRecord, Mood, Outcome, RecordKind, SuppressReason, WallTime,
};
use crate::app::ports::{ActuatorPort, DelayPort, DisplayPort, EventLogPort};
use crate::config::ControllerConfig;
use crate::error::{ActuatorError, CollaboratorFault, Error};
use crate::safety::{ActivationState, GateVerdict, RateGate};

/// Message shown when the per-minute cap blocks a trigger.
pub const RATE_LIMIT_MESSAGE: &str = "Too many activations";

/// Label shown before the first trigger.
pub const NEVER_LABEL: &str = "Never";

/// Monotonic + wall time sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timestamp {
    pub monotonic_secs: f64,
    pub wall: WallTime,
}

/// Owns the activation state and the last-detection label.
pub struct ActuationController {
    gate: RateGate,
    pump_on: Duration,
    last_detection: heapless::String<8>,
}

impl ActuationController {
    pub fn new(config: &ControllerConfig) -> Self {
        let mut last_detection = heapless::String::new();
        let _ = last_detection.push_str(NEVER_LABEL);
        Self {
            gate: RateGate::new(config),
            pump_on: config.pump_on_duration(),
            last_detection,
        }
    }

    /// Handle one classified event.
    ///
    /// `io` satisfies the actuator, delay, display and log ports at once,
    /// which avoids juggling several mutable borrows of the same board.
    ///
    /// Display and log failures are folded into [`Decision::faults`].  An
    /// actuator failure is returned as `Err` after the relay has been
    /// driven off (best effort) and the activation has been counted.
    pub async fn handle<IO>(
        &mut self,
        event: DetectionEvent,
        now: Timestamp,
        io: &mut IO,
    ) -> Result<Decision, Error>
    where
        IO: ActuatorPort + DelayPort + DisplayPort + EventLogPort,
    {
        let distance = match event {
            DetectionEvent::None | DetectionEvent::Idle(_) => {
                let faults = self.show_status(io, Mood::Watching);
                return Ok(Decision {
                    outcome: Outcome::Ignored,
                    faults,
                });
            }
            DetectionEvent::Trigger(d) => d,
        };

        let mut faults = self.show_status(io, Mood::Angry);
        let verdict = self.gate.evaluate(now.monotonic_secs);
        self.last_detection = now.wall.hhmm();

        let outcome = match verdict {
            GateVerdict::Clear => {
                self.gate.record_activation(now.monotonic_secs);
                self.pulse(io).await?;
                info!(
                    "PUMP | fired at {:.1}cm ({} this minute)",
                    distance,
                    self.gate.state().activation_count
                );
                let record = DetectionRecord {
                    kind: RecordKind::CatDetected,
                    distance_cm: distance,
                    presence: true,
                    timestamp: now.wall,
                };
                if let Err(e) = io.append(&record) {
                    warn!("LOG | append failed: {}", e);
                    faults |= CollaboratorFault::EventLog.mask();
                }
                Outcome::Actuated
            }
            GateVerdict::RateLimited => {
                if let Err(e) = io.show_error(RATE_LIMIT_MESSAGE) {
                    warn!("DISPLAY | error frame failed: {}", e);
                    faults |= CollaboratorFault::Display.mask();
                }
                Outcome::Suppressed(SuppressReason::RateLimited)
            }
            GateVerdict::Cooldown => Outcome::Suppressed(SuppressReason::Cooldown),
        };

        Ok(Decision { outcome, faults })
    }

    /// Snapshot of the safety state (diagnostics only).
    pub fn activation_state(&self) -> ActivationState {
        self.gate.state()
    }

    /// "Never" until the first trigger, then `HH:MM` of the latest one.
    pub fn last_detection(&self) -> &str {
        self.last_detection.as_str()
    }

    // ── Internal ──────────────────────────────────────────────

    fn show_status(&self, io: &mut impl DisplayPort, mood: Mood) -> u8 {
        match io.show_status(mood, self.last_detection.as_str()) {
            Ok(()) => 0,
            Err(e) => {
                warn!("DISPLAY | status frame failed: {}", e);
                CollaboratorFault::Display.mask()
            }
        }
    }

    /// Energise, hold, release.  The relay is off when this returns or
    /// when the future is dropped.
    async fn pulse<IO>(&self, io: &mut IO) -> Result<(), ActuatorError>
    where
        IO: ActuatorPort + DelayPort,
    {
        if io.is_on() {
            warn!("PUMP | relay already on before activation, forcing off");
            io.set(false)?;
        }

        let mut guard = PumpGuard::engage(io)?;
        guard.hold(self.pump_on).await;
        guard.release()
    }
}

/// Scoped pump-on span.  Dropping the guard drives the relay off.
pub struct PumpGuard<'a, A: ActuatorPort> {
    actuator: &'a mut A,
    released: bool,
}

impl<'a, A: ActuatorPort> PumpGuard<'a, A> {
    /// Turn the pump on.  On failure the relay is driven off again before
    /// the error is returned.
    pub fn engage(actuator: &'a mut A) -> Result<Self, ActuatorError> {
        if let Err(e) = actuator.set(true) {
            error!("PUMP | relay on failed: {}", e);
            let _ = actuator.set(false);
            return Err(e);
        }
        Ok(Self {
            actuator,
            released: false,
        })
    }

    /// Turn the pump off.  If the write fails, the drop handler retries.
    pub fn release(mut self) -> Result<(), ActuatorError> {
        self.actuator.set(false)?;
        if self.actuator.is_on() {
            return Err(ActuatorError::StuckOn);
        }
        self.released = true;
        Ok(())
    }
}

impl<A: ActuatorPort + DelayPort> PumpGuard<'_, A> {
    /// Suspend for `duration` with the pump energised.
    pub async fn hold(&mut self, duration: Duration) {
        self.actuator.delay(duration).await;
    }
}

impl<A: ActuatorPort> Drop for PumpGuard<'_, A> {
    fn drop(&mut self) {
        if !self.released {
            warn!("PUMP | guard dropped while energised, forcing off");
            if let Err(e) = self.actuator.set(false) {
                error!("PUMP | forced off failed: {}", e);
            }
        }
    }
}
