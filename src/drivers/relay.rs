//! Pump relay driver.
//!
//! A single digital output switches the pump's relay module.  Many cheap
//! relay boards are active-low, so the polarity is configurable.
//!
//! ## Safety contract
//!
//! The relay is driven off at construction.  The cooldown, rate limit and
//! hold duration are enforced by the controller; this driver is a dumb
//! actuator.
//!
//! Generic over [`embedded_hal::digital::OutputPin`], so the same driver
//! runs on real GPIO and on the host simulation pin.

use embedded_hal::digital::{Error as _, OutputPin};
use log::{debug, error};

use crate::app::ports::ActuatorPort;
use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Pin high = pump on.
    ActiveHigh,
    /// Pin low = pump on.
    ActiveLow,
}

pub struct RelayDriver<P> {
    pin: P,
    polarity: Polarity,
    energised: bool,
}

impl<P: OutputPin> RelayDriver<P> {
    pub fn new(pin: P, polarity: Polarity) -> Self {
        let mut relay = Self {
            pin,
            polarity,
            energised: true,
        };
        if let Err(e) = relay.write(false) {
            error!("RELAY | initial off failed: {}", e);
        }
        relay
    }

    fn write(&mut self, on: bool) -> Result<(), ActuatorError> {
        let high = match self.polarity {
            Polarity::ActiveHigh => on,
            Polarity::ActiveLow => !on,
        };
        let res = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        res.map_err(|e| {
            error!("RELAY | pin write failed: {:?}", e.kind());
            ActuatorError::GpioWriteFailed
        })?;
        self.energised = on;
        debug!("RELAY | {}", if on { "on" } else { "off" });
        Ok(())
    }
}

impl<P: OutputPin> ActuatorPort for RelayDriver<P> {
    fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.write(on)
    }

    fn is_on(&self) -> bool {
        self.energised
    }
}
