//! Pruners decide whether a running trial should stop early
//!
//! A pruner sees the running trial's intermediate values and the history of
//! completed trials. All pruners are stateless; decisions depend only on
//! their inputs.

use serde::{Deserialize, Serialize};

use super::trial_record::{IntermediateValue, TrialRecord, TrialState};
use crate::{Error, Result};

/// Optimization direction of a study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Lower objective values are better (e.g. loss)
    #[default]
    Minimize,
    /// Higher objective values are better (e.g. accuracy)
    Maximize,
}

impl Direction {
    /// Whether `a` is strictly better than `b`.
    #[must_use]
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            Self::Minimize => a < b,
            Self::Maximize => a > b,
        }
    }
}

/// Decides whether a running trial should be pruned.
pub trait Pruner {
    /// `trial` is the running trial; `history` holds every finished trial.
    fn prune(&self, trial: &TrialRecord, history: &[TrialRecord], direction: Direction) -> bool;

    /// Pruner name for logging
    fn name(&self) -> &'static str;
}

/// Never prunes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopPruner;

impl Pruner for NopPruner {
    fn prune(&self, _: &TrialRecord, _: &[TrialRecord], _: Direction) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "NopPruner"
    }
}

/// Whether `step` is the first reported step at or after the most recent
/// pruning boundary, so each interval is judged once.
fn is_first_in_interval(trial: &TrialRecord, step: u64, warmup: u64, interval: u64) -> bool {
    let boundary = (step - warmup) / interval * interval + warmup;
    let previous = trial
        .intermediate_values()
        .iter()
        .map(IntermediateValue::step)
        .filter(|&s| s < step)
        .max();
    previous.map_or(true, |prev| prev < boundary)
}

/// Linear-interpolated percentile of a non-empty, sorted slice.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    #[allow(clippy::cast_precision_loss)]
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Prunes a trial whose best intermediate value is worse than the median of
/// completed trials at the same step.
///
/// Deserialization goes through [`MedianPruner::new`], so a zero
/// `interval_steps` is rejected at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MedianPrunerSettings")]
pub struct MedianPruner {
    n_startup_trials: usize,
    n_warmup_steps: u64,
    interval_steps: u64,
}

/// Unvalidated wire form of [`MedianPruner`].
#[derive(Deserialize)]
struct MedianPrunerSettings {
    n_startup_trials: usize,
    n_warmup_steps: u64,
    interval_steps: u64,
}

impl TryFrom<MedianPrunerSettings> for MedianPruner {
    type Error = Error;

    fn try_from(s: MedianPrunerSettings) -> Result<Self> {
        Self::new(s.n_startup_trials, s.n_warmup_steps, s.interval_steps)
    }
}

impl Default for MedianPruner {
    fn default() -> Self {
        Self {
            n_startup_trials: 5,
            n_warmup_steps: 0,
            interval_steps: 1,
        }
    }
}

impl MedianPruner {
    /// Create a median pruner.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `interval_steps` is zero.
    pub fn new(n_startup_trials: usize, n_warmup_steps: u64, interval_steps: u64) -> Result<Self> {
        if interval_steps == 0 {
            return Err(Error::InvalidConfig("interval_steps must be at least 1".into()));
        }
        Ok(Self {
            n_startup_trials,
            n_warmup_steps,
            interval_steps,
        })
    }

    /// Completed trials required before any pruning.
    #[must_use]
    pub const fn n_startup_trials(&self) -> usize {
        self.n_startup_trials
    }

    /// Steps to run before a trial can be pruned.
    #[must_use]
    pub const fn n_warmup_steps(&self) -> u64 {
        self.n_warmup_steps
    }

    /// Check once per this many steps after warmup.
    #[must_use]
    pub const fn interval_steps(&self) -> u64 {
        self.interval_steps
    }
}

impl Pruner for MedianPruner {
    fn prune(&self, trial: &TrialRecord, history: &[TrialRecord], direction: Direction) -> bool {
        let Some(last) = trial.last_intermediate() else {
            return false;
        };
        let step = last.step();

        let completed: Vec<&TrialRecord> = history
            .iter()
            .filter(|t| t.state() == TrialState::Complete)
            .collect();
        if completed.len() < self.n_startup_trials {
            return false;
        }
        if step < self.n_warmup_steps {
            return false;
        }
        if !is_first_in_interval(trial, step, self.n_warmup_steps, self.interval_steps) {
            return false;
        }

        let best = trial
            .intermediate_values()
            .iter()
            .map(IntermediateValue::value)
            .filter(|v| !v.is_nan())
            .reduce(|a, b| if direction.is_better(b, a) { b } else { a });
        let Some(best) = best else {
            // Only NaN reported so far.
            return true;
        };

        let mut at_step: Vec<f64> = completed
            .iter()
            .filter_map(|t| t.intermediate_at(step))
            .filter(|v| !v.is_nan())
            .collect();
        if at_step.is_empty() {
            return false;
        }
        at_step.sort_by(f64::total_cmp);
        let median = percentile(&at_step, 50.0);

        direction.is_better(median, best)
    }

    fn name(&self) -> &'static str {
        "MedianPruner"
    }
}

/// Prunes a trial whose latest value leaves `[lower, upper]` or is NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ThresholdPrunerSettings")]
pub struct ThresholdPruner {
    lower: Option<f64>,
    upper: Option<f64>,
    n_warmup_steps: u64,
}

/// Unvalidated wire form of [`ThresholdPruner`].
#[derive(Deserialize)]
struct ThresholdPrunerSettings {
    #[serde(default)]
    lower: Option<f64>,
    #[serde(default)]
    upper: Option<f64>,
    #[serde(default)]
    n_warmup_steps: u64,
}

impl TryFrom<ThresholdPrunerSettings> for ThresholdPruner {
    type Error = Error;

    fn try_from(s: ThresholdPrunerSettings) -> Result<Self> {
        Self::new(s.lower, s.upper, s.n_warmup_steps)
    }
}

impl ThresholdPruner {
    /// Create a threshold pruner.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if neither bound is set or
    /// `lower > upper`.
    pub fn new(lower: Option<f64>, upper: Option<f64>, n_warmup_steps: u64) -> Result<Self> {
        match (lower, upper) {
            (None, None) => {
                return Err(Error::InvalidConfig(
                    "either lower or upper must be specified".into(),
                ))
            }
            (Some(lo), Some(hi)) if lo > hi => {
                return Err(Error::InvalidConfig(format!(
                    "lower ({lo}) must not exceed upper ({hi})"
                )))
            }
            _ => {}
        }
        Ok(Self {
            lower,
            upper,
            n_warmup_steps,
        })
    }
}

impl Pruner for ThresholdPruner {
    fn prune(&self, trial: &TrialRecord, _: &[TrialRecord], _: Direction) -> bool {
        let Some(last) = trial.last_intermediate() else {
            return false;
        };
        if last.step() < self.n_warmup_steps {
            return false;
        }

        let value = last.value();
        if value.is_nan() {
            return true;
        }
        self.lower.is_some_and(|lo| value < lo) || self.upper.is_some_and(|hi| value > hi)
    }

    fn name(&self) -> &'static str {
        "ThresholdPruner"
    }
}
