//! Pruning callback: report an epoch metric to a trial and stop unpromising runs

use super::traits::{TrainerCallback, Trial};
use crate::availability;
use crate::config::PruningConfig;
use crate::logs::Logs;
use crate::{Error, Result};

/// What a single `on_epoch_end` call did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EpochOutcome {
    /// Off-interval epoch, nothing checked.
    Skipped,
    /// Monitored metric absent (or null) in the logs; a warning was emitted.
    MetricMissing,
    /// Value reported and the trial continues.
    Reported {
        /// Value forwarded to the trial
        value: f64,
    },
}

/// Callback that prunes unpromising trials.
///
/// Every `interval`-th epoch it reads `monitor` from the epoch logs, reports
/// it to the trial with the epoch index as step, then asks the trial whether
/// to prune. A prune decision surfaces as [`Error::TrialPruned`], which the
/// training loop propagates to stop training.
///
/// # Example
///
/// ```rust
/// use trial_prune::callback::{EpochOutcome, PruningCallback, Trial};
/// use trial_prune::Logs;
///
/// struct Patient;
/// impl Trial for Patient {
///     fn report(&mut self, _value: f64, _step: u64) {}
///     fn should_prune(&self) -> bool { false }
/// }
///
/// # if !trial_prune::availability::TRAINER.is_available() { return Ok(()); }
/// let mut callback = PruningCallback::new(Patient, "val_loss")?;
/// let logs = Logs::new().with("val_loss", 0.2);
/// assert_eq!(
///     callback.check_epoch(0, Some(&logs))?,
///     EpochOutcome::Reported { value: 0.2 }
/// );
/// # Ok::<(), trial_prune::Error>(())
/// ```
#[derive(Debug)]
pub struct PruningCallback<T> {
    trial: T,
    monitor: String,
    interval: u64,
}

impl<T: Trial> PruningCallback<T> {
    /// Create a callback that checks after every epoch.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unavailable` without the `trainer` backend, or
    /// `Error::InvalidConfig` if `monitor` is empty.
    pub fn new(trial: T, monitor: impl Into<String>) -> Result<Self> {
        Self::with_interval(trial, monitor, 1)
    }

    /// Create a callback that checks every `interval`-th epoch.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unavailable` without the `trainer` backend, or
    /// `Error::InvalidConfig` if `monitor` is empty or `interval` is zero.
    pub fn with_interval(trial: T, monitor: impl Into<String>, interval: u64) -> Result<Self> {
        availability::TRAINER.check()?;

        let monitor = monitor.into();
        if monitor.is_empty() {
            return Err(Error::InvalidConfig("monitor must name a metric".into()));
        }
        if interval == 0 {
            return Err(Error::InvalidConfig("interval must be at least 1".into()));
        }

        Ok(Self {
            trial,
            monitor,
            interval,
        })
    }

    /// Create a callback from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Same as [`PruningCallback::with_interval`].
    pub fn from_config(trial: T, config: &PruningConfig) -> Result<Self> {
        Self::with_interval(trial, config.monitor.clone(), config.interval)
    }

    /// Monitored metric name.
    #[must_use]
    pub fn monitor(&self) -> &str {
        &self.monitor
    }

    /// Check interval in epochs.
    #[must_use]
    pub const fn interval(&self) -> u64 {
        self.interval
    }

    /// The wrapped trial.
    #[must_use]
    pub const fn trial(&self) -> &T {
        &self.trial
    }

    /// Give the trial back.
    #[must_use]
    pub fn into_trial(self) -> T {
        self.trial
    }

    /// Whether `epoch` (zero-based) falls on a check boundary.
    #[must_use]
    pub const fn is_check_epoch(&self, epoch: u64) -> bool {
        // Same as (epoch + 1) % interval == 0 without overflow at u64::MAX.
        epoch % self.interval == self.interval - 1
    }

    /// Run the epoch-end check and describe what happened.
    ///
    /// # Errors
    ///
    /// Returns `Error::TrialPruned` when the trial should stop, or
    /// `Error::MetricConversion` when the monitored value is not numeric.
    pub fn check_epoch(&mut self, epoch: u64, logs: Option<&Logs>) -> Result<EpochOutcome> {
        if !self.is_check_epoch(epoch) {
            return Ok(EpochOutcome::Skipped);
        }

        let raw = logs
            .and_then(|logs| logs.get(&self.monitor))
            .filter(|value| !value.is_null());
        let Some(raw) = raw else {
            tracing::warn!(
                metric = %self.monitor,
                epoch,
                "The metric '{}' is not in the evaluation logs for pruning. \
                 Please make sure you set the correct metric name.",
                self.monitor
            );
            return Ok(EpochOutcome::MetricMissing);
        };

        let value = raw.to_f64(&self.monitor)?;
        self.trial.report(value, epoch);
        tracing::debug!(metric = %self.monitor, epoch, value, "reported intermediate value");

        if self.trial.should_prune() {
            tracing::info!(metric = %self.monitor, epoch, value, "trial pruned");
            return Err(Error::pruned_at_epoch(epoch));
        }

        Ok(EpochOutcome::Reported { value })
    }
}

impl<T: Trial> TrainerCallback for PruningCallback<T> {
    fn on_epoch_end(&mut self, epoch: u64, logs: Option<&Logs>) -> Result<()> {
        self.check_epoch(epoch, logs).map(|_| ())
    }

    fn name(&self) -> &'static str {
        "PruningCallback"
    }
}
