//! Host simulation peripherals.
//!
//! A [`Scenario`] is a scripted list of (presence, distance) samples,
//! either loaded from JSON or generated by [`Scenario::cat_pass`].  A
//! [`SimSource`] plays it back through the real drivers:
//!
//! ```text
//!  Scenario ──▶ ScenarioPirPin (InputPin) ──▶ PirSensor
//!           └─▶ ScenarioRanger (RawRanger) ─▶ PlausibilityFilter
//!  RelayDriver ──▶ SimRelayPin (OutputPin) ──▶ RelayProbe
//! ```
//!
//! JSON layout: `{"samples": [{"presence": true, "distance_cm": 42.0}, ...],
//! "repeat": false}`.  A `null` / absent distance plays back as an echo
//! timeout.

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::SensorError;
use crate::sensors::RawRanger;

/// One scripted tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub presence: bool,
    #[serde(default)]
    pub distance_cm: Option<f32>,
}

impl Sample {
    pub const fn new(presence: bool, distance_cm: Option<f32>) -> Self {
        Self {
            presence,
            distance_cm,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub samples: Vec<Sample>,
    /// Loop back to the first sample instead of finishing.
    #[serde(default)]
    pub repeat: bool,
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Empty yard, a cat darting through the band, a person standing
    /// still, then a second pass.  Repeats.
    pub fn cat_pass() -> Self {
        let mut samples = Vec::new();
        // Nothing in front of the ranger.
        samples.extend((0..20).map(|_| Sample::new(false, Some(250.0))));
        // Cat dashes in and out of the band.
        for d in [95.0, 80.0, 62.0, 45.0, 38.0, 52.0, 71.0, 88.0] {
            samples.push(Sample::new(true, Some(d)));
        }
        // A couple of dropped echoes.
        samples.extend((0..2).map(|_| Sample::new(true, None)));
        // Someone standing still at 60 cm: presence without movement.
        samples.extend((0..30).map(|i| Sample::new(true, Some(60.0 + (i % 3) as f32))));
        // Second pass, inside the cooldown of the first.
        for d in [90.0, 40.0, 85.0, 35.0] {
            samples.push(Sample::new(true, Some(d)));
        }
        samples.extend((0..60).map(|_| Sample::new(false, Some(250.0))));
        Self {
            samples,
            repeat: true,
        }
    }
}

struct Player {
    scenario: Scenario,
    cursor: usize,
}

impl Player {
    fn current(&self) -> Option<Sample> {
        self.scenario.samples.get(self.cursor).copied()
    }
}

/// Shared playback cursor.  Cloned handles see the same position.
#[derive(Clone)]
pub struct SimSource {
    player: Rc<RefCell<Player>>,
}

impl SimSource {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            player: Rc::new(RefCell::new(Player {
                scenario,
                cursor: 0,
            })),
        }
    }

    pub fn pir_pin(&self) -> ScenarioPirPin {
        ScenarioPirPin {
            source: self.clone(),
        }
    }

    pub fn ranger(&self) -> ScenarioRanger {
        ScenarioRanger {
            source: self.clone(),
        }
    }

    /// Move to the next sample.  Returns `false` once a non-repeating
    /// scenario is exhausted.
    pub fn advance(&self) -> bool {
        let mut p = self.player.borrow_mut();
        let len = p.scenario.samples.len();
        if len == 0 {
            return false;
        }
        p.cursor += 1;
        if p.cursor >= len {
            if p.scenario.repeat {
                debug!("SIM | scenario wrapped");
                p.cursor = 0;
            } else {
                p.cursor = len;
                return false;
            }
        }
        true
    }

    pub fn is_finished(&self) -> bool {
        self.player.borrow().current().is_none()
    }

    fn current(&self) -> Option<Sample> {
        self.player.borrow().current()
    }
}

/// PIR output as seen by [`PirSensor`](crate::sensors::PirSensor).
pub struct ScenarioPirPin {
    source: SimSource,
}

impl ErrorType for ScenarioPirPin {
    type Error = Infallible;
}

impl InputPin for ScenarioPirPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.source.current().is_some_and(|s| s.presence))
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|h| !h)
    }
}

/// Ranger fed from the scenario.  A missing distance is an echo timeout.
pub struct ScenarioRanger {
    source: SimSource,
}

impl RawRanger for ScenarioRanger {
    fn measure_cm(&mut self) -> Result<f32, SensorError> {
        self.source
            .current()
            .and_then(|s| s.distance_cm)
            .ok_or(SensorError::EchoTimeout)
    }
}

/// Relay output pin that records its level.
pub struct SimRelayPin {
    level: Rc<Cell<bool>>,
    edges: Rc<Cell<u32>>,
}

/// Read side of a [`SimRelayPin`], kept by the runner after the pin has
/// been moved into the driver.
#[derive(Clone)]
pub struct RelayProbe {
    level: Rc<Cell<bool>>,
    edges: Rc<Cell<u32>>,
}

impl RelayProbe {
    pub fn is_high(&self) -> bool {
        self.level.get()
    }

    /// Level changes seen so far.
    pub fn edges(&self) -> u32 {
        self.edges.get()
    }
}

impl SimRelayPin {
    pub fn new() -> (Self, RelayProbe) {
        let level = Rc::new(Cell::new(false));
        let edges = Rc::new(Cell::new(0));
        (
            Self {
                level: level.clone(),
                edges: edges.clone(),
            },
            RelayProbe { level, edges },
        )
    }

    fn drive(&mut self, high: bool) {
        if self.level.get() != high {
            self.edges.set(self.edges.get() + 1);
            debug!("SIM | relay pin {}", if high { "high" } else { "low" });
        }
        self.level.set(high);
    }
}

impl ErrorType for SimRelayPin {
    type Error = Infallible;
}

impl OutputPin for SimRelayPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.drive(true);
        Ok(())
    }
}
