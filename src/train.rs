//! Sequential epoch loop
//!
//! Runs a user-supplied epoch closure and fires epoch-end callbacks with the
//! logs it produced. The first error (including a pruning signal) ends
//! training.

use crate::callback::CallbackManager;
use crate::logs::Logs;
use crate::{Error, Result};

/// Summary of a training run that finished all epochs.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainSummary {
    /// Epochs executed
    pub epochs_run: u64,
    /// Logs of the final epoch
    pub last_logs: Logs,
}

/// Epoch loop driver.
#[derive(Debug, Clone, Copy)]
pub struct Trainer {
    max_epochs: u64,
}

impl Trainer {
    /// Create a trainer that runs up to `max_epochs` epochs.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `max_epochs` is zero.
    pub fn new(max_epochs: u64) -> Result<Self> {
        if max_epochs == 0 {
            return Err(Error::InvalidConfig("max_epochs must be at least 1".into()));
        }
        Ok(Self { max_epochs })
    }

    /// Planned epoch count.
    #[must_use]
    pub const fn max_epochs(&self) -> u64 {
        self.max_epochs
    }

    /// Train, calling `epoch_fn(epoch)` for each zero-based epoch.
    ///
    /// `on_train_end` fires whether training finishes or stops on an error.
    ///
    /// # Errors
    ///
    /// Returns the first error from `epoch_fn` or a callback, e.g.
    /// `Error::TrialPruned`.
    pub fn fit<F>(&self, callbacks: &mut CallbackManager<'_>, mut epoch_fn: F) -> Result<TrainSummary>
    where
        F: FnMut(u64) -> Result<Logs>,
    {
        callbacks.on_train_begin()?;

        let mut last_logs = Logs::new();
        let mut result = Ok(());
        let mut epochs_run = 0;
        for epoch in 0..self.max_epochs {
            result = epoch_fn(epoch).and_then(|logs| {
                epochs_run = epoch + 1;
                callbacks.on_epoch_end(epoch, Some(&logs))?;
                last_logs = logs;
                Ok(())
            });
            if result.is_err() {
                break;
            }
        }

        callbacks.on_train_end();

        match result {
            Ok(()) => {
                tracing::debug!(epochs_run, "training finished");
                Ok(TrainSummary {
                    epochs_run,
                    last_logs,
                })
            }
            Err(err) => {
                tracing::debug!(epochs_run, error = %err, "training stopped");
                Err(err)
            }
        }
    }
}
