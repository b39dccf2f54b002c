//! Pruning configuration
//!
//! Loaded from JSON alongside the rest of a search configuration:
//!
//! ```json
//! { "monitor": "val_loss", "interval": 2 }
//! ```

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const fn default_interval() -> u64 {
    1
}

/// Settings for a [`crate::callback::PruningCallback`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruningConfig {
    /// Metric to monitor, e.g. `val_loss` or `val_accuracy`
    pub monitor: String,
    /// Check every n-th epoch
    #[serde(default = "default_interval")]
    pub interval: u64,
}

impl PruningConfig {
    /// Create a config that checks every epoch.
    #[must_use]
    pub fn new(monitor: impl Into<String>) -> Self {
        Self {
            monitor: monitor.into(),
            interval: default_interval(),
        }
    }

    /// Set the check interval.
    #[must_use]
    pub const fn interval(mut self, interval: u64) -> Self {
        self.interval = interval;
        self
    }

    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` on malformed input or `Error::InvalidConfig` if
    /// validation fails.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field constraints.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for an empty monitor or zero interval.
    pub fn validate(&self) -> Result<()> {
        if self.monitor.is_empty() {
            return Err(Error::InvalidConfig("monitor must name a metric".into()));
        }
        if self.interval == 0 {
            return Err(Error::InvalidConfig("interval must be at least 1".into()));
        }
        Ok(())
    }
}
