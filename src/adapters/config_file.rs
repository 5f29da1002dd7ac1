//! JSON file configuration adapter.
//!
//! Implements [`ConfigPort`] for the host runner.  A missing path or a
//! missing file yields [`ControllerConfig::default()`]; fields absent from
//! the file keep their defaults.  Every loaded config is validated.

use std::path::PathBuf;

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::ControllerConfig;

pub struct JsonConfigFile {
    path: Option<PathBuf>,
}

impl JsonConfigFile {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<ControllerConfig, ConfigError> {
        let Some(path) = &self.path else {
            info!("CONFIG | no file given, using defaults");
            return Ok(ControllerConfig::default());
        };

        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("CONFIG | {} not found, using defaults", path.display());
                return Ok(ControllerConfig::default());
            }
            Err(e) => {
                warn!("CONFIG | read {} failed: {}", path.display(), e);
                return Err(ConfigError::IoError);
            }
        };

        let config: ControllerConfig = serde_json::from_str(&text).map_err(|e| {
            warn!("CONFIG | parse {} failed: {}", path.display(), e);
            ConfigError::Corrupted
        })?;
        config.validate()?;
        info!("CONFIG | loaded {}", path.display());
        Ok(config)
    }
}
