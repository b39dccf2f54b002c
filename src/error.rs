//! Error types for trial-prune
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// trial-prune error types
#[derive(Error, Debug)]
pub enum Error {
    /// The trial was judged unpromising and training must stop.
    ///
    /// This is expected control flow for the host loop, not a defect.
    /// Hosts should match it with [`Error::is_pruned`].
    #[error("{0}")]
    TrialPruned(String),

    /// A required backend is not compiled in
    #[error("{backend} backend is not available\n{hint}")]
    Unavailable {
        /// Backend name
        backend: &'static str,
        /// How to enable it
        hint: &'static str,
    },

    /// Invalid configuration (empty monitor, zero interval, ...)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Monitored metric value could not be converted to a float
    #[error("Metric '{metric}' has non-numeric value {value:?}")]
    MetricConversion {
        /// Monitored metric name
        metric: String,
        /// Offending value, as text
        value: String,
    },

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build the stop signal raised when a trial is pruned at `epoch`.
    #[must_use]
    pub fn pruned_at_epoch(epoch: u64) -> Self {
        Self::TrialPruned(format!("Trial was pruned at epoch {epoch}."))
    }

    /// Whether this error is the pruning stop signal.
    #[must_use]
    pub const fn is_pruned(&self) -> bool {
        matches!(self, Self::TrialPruned(_))
    }
}
