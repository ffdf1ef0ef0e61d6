use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{PaintError, Result};

/// Settings for one solve run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Wall-clock budget handed to the solver.
    pub time_limit_ms: u64,
    /// Apply the Patch-Ratio check while generating lines.
    pub patch_ratio: bool,
    /// Replay the extracted program and compare it against the input.
    pub verify: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_limit_ms: 20_000,
            patch_ratio: true,
            verify: true,
        }
    }
}

impl Config {
    /// # Errors
    ///
    /// Returns an error if the time limit is zero.
    pub fn validate(&self) -> Result<()> {
        if self.time_limit_ms == 0 {
            return Err(PaintError::InvalidConfig("time_limit_ms must be positive"));
        }
        Ok(())
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }

    /// Load a JSON config file. Missing fields fall back to their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}
