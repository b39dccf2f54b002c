//! Collaborator contracts for the callback system
//!
//! - `TrainerCallback` - what a training loop calls at epoch boundaries
//! - `Trial` - what a hyperparameter search exposes to a running objective

use crate::logs::Logs;
use crate::Result;

/// Trait for training callbacks
///
/// Implement this trait to hook into training events. All methods have
/// default no-op implementations, so you only need to implement the
/// events you care about.
///
/// Returning an error from `on_epoch_end` terminates the training loop.
pub trait TrainerCallback {
    /// Called before training starts
    ///
    /// # Errors
    ///
    /// An error aborts training before the first epoch.
    fn on_train_begin(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called after training ends, including when an epoch failed
    fn on_train_end(&mut self) {}

    /// Called after each epoch with that epoch's logs
    ///
    /// # Errors
    ///
    /// An error stops training; see [`crate::Error::TrialPruned`].
    fn on_epoch_end(&mut self, _epoch: u64, _logs: Option<&Logs>) -> Result<()> {
        Ok(())
    }

    /// Get callback name for logging
    fn name(&self) -> &'static str {
        "TrainerCallback"
    }
}

/// A single evaluation of an objective under hyperparameter search.
pub trait Trial {
    /// Record an intermediate objective value at `step`.
    fn report(&mut self, value: f64, step: u64);

    /// Whether the search wants this trial stopped.
    fn should_prune(&self) -> bool;
}

impl<T: Trial + ?Sized> Trial for &mut T {
    fn report(&mut self, value: f64, step: u64) {
        (**self).report(value, step);
    }

    fn should_prune(&self) -> bool {
        (**self).should_prune()
    }
}

impl<T: Trial + ?Sized> Trial for Box<T> {
    fn report(&mut self, value: f64, step: u64) {
        (**self).report(value, step);
    }

    fn should_prune(&self) -> bool {
        (**self).should_prune()
    }
}
