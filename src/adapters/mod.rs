//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                 |
//! |----------------|--------------------|-----------------------------|
//! | `board`        | every port         | bundles the adapters below  |
//! | `config_file`  | ConfigPort         | JSON file on the host       |
//! | `delay`        | DelayPort          | async-io-mini reactor timer |
//! | `display`      | DisplayPort        | Log output (OLED mirror)    |
//! | `log_sink`     | EventLogPort       | Log output / text file      |
//! | `sim`          | InputPin, RawRanger, OutputPin | scripted scenario |
//! | `time`         | ClockPort          | std Instant + chrono Local  |

pub mod board;
pub mod config_file;
pub mod delay;
pub mod display;
pub mod log_sink;
pub mod sim;
pub mod time;
