//! PIR presence sensor.
//!
//! The PIR module drives its output HIGH while it sees motion.  The pin is
//! configured as a pulled-down input so a disconnected sensor reads as
//! "nobody there".

use embedded_hal::digital::{Error as _, InputPin};
use log::warn;

use crate::app::ports::PresenceSensor;
use crate::error::SensorError;

pub struct PirSensor<P> {
    pin: P,
    read_errors: u32,
}

impl<P: InputPin> PirSensor<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            read_errors: 0,
        }
    }

    /// Raw read; errors are surfaced here and absorbed by the port impl.
    pub fn try_read(&mut self) -> Result<bool, SensorError> {
        self.pin.is_high().map_err(|e| {
            warn!("PIR | read failed: {:?}", e.kind());
            SensorError::GpioReadFailed
        })
    }

    /// Failed reads since construction.
    pub fn read_errors(&self) -> u32 {
        self.read_errors
    }
}

impl<P: InputPin> PresenceSensor for PirSensor<P> {
    fn read_presence(&mut self) -> bool {
        match self.try_read() {
            Ok(level) => level,
            Err(_) => {
                self.read_errors = self.read_errors.saturating_add(1);
                false
            }
        }
    }
}
