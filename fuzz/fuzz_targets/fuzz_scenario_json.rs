//! Fuzz target: scenario and config JSON parsing
//!
//! Feeds arbitrary bytes to `Scenario::from_json` and the config parser
//! and verifies:
//! - No panics under arbitrary input
//! - A config that parses either validates or is rejected with a typed error
//! - A parsed scenario plays back without panicking
//!
//! cargo fuzz run fuzz_scenario_json

#![no_main]

use catdeterrent::adapters::sim::{Scenario, SimSource};
use catdeterrent::app::ports::{PresenceSensor, RangeSensor};
use catdeterrent::config::ControllerConfig;
use catdeterrent::sensors::{PirSensor, PlausibilityFilter};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    if let Ok(config) = serde_json::from_str::<ControllerConfig>(text) {
        let _ = config.validate();
    }

    if let Ok(mut scenario) = Scenario::from_json(text) {
        scenario.repeat = false;
        let source = SimSource::new(scenario);
        let mut pir = PirSensor::new(source.pir_pin());
        let mut range = PlausibilityFilter::new(source.ranger());
        loop {
            let _ = pir.read_presence();
            if let Some(d) = range.read_distance_cm() {
                assert!(d.is_finite() && d >= 0.0);
            }
            if !source.advance() {
                break;
            }
        }
    }
});
