//! Trial Record - one evaluation of the objective within a study

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialState {
    /// Objective is currently executing.
    Running,
    /// Objective returned a value.
    Complete,
    /// Stopped early by the pruner.
    Pruned,
    /// Objective failed with an error.
    Fail,
}

impl TrialState {
    /// Whether the trial has finished (in any way).
    #[must_use]
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Intermediate objective value reported at a step.
///
/// Ordered by `step` within a trial; `timestamp` correlates reports with
/// wall-clock time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntermediateValue {
    trial_number: u64,
    step: u64,
    value: f64,
    timestamp: DateTime<Utc>,
}

impl IntermediateValue {
    /// Create a new intermediate value with the current timestamp.
    #[must_use]
    pub fn new(trial_number: u64, step: u64, value: f64) -> Self {
        Self {
            trial_number,
            step,
            value,
            timestamp: Utc::now(),
        }
    }

    /// Owning trial number.
    #[must_use]
    pub const fn trial_number(&self) -> u64 {
        self.trial_number
    }

    /// Step (epoch) the value was reported at.
    #[must_use]
    pub const fn step(&self) -> u64 {
        self.step
    }

    /// Reported value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// When the value was reported.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Trial Record tracks one trial from start to its final state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrialRecord {
    number: u64,
    state: TrialState,
    value: Option<f64>,
    intermediate_values: Vec<IntermediateValue>,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl TrialRecord {
    /// Create a running trial record.
    #[must_use]
    pub fn new(number: u64) -> Self {
        Self {
            number,
            state: TrialState::Running,
            value: None,
            intermediate_values: Vec::new(),
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    /// Trial number within its study.
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.number
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> TrialState {
        self.state
    }

    /// Final objective value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        self.value
    }

    /// Reported intermediate values, ordered by step.
    #[must_use]
    pub fn intermediate_values(&self) -> &[IntermediateValue] {
        &self.intermediate_values
    }

    /// Value reported at `step`, if any.
    #[must_use]
    pub fn intermediate_at(&self, step: u64) -> Option<f64> {
        self.intermediate_values
            .binary_search_by_key(&step, IntermediateValue::step)
            .ok()
            .map(|i| self.intermediate_values[i].value())
    }

    /// Most recent intermediate value (highest step).
    #[must_use]
    pub fn last_intermediate(&self) -> Option<&IntermediateValue> {
        self.intermediate_values.last()
    }

    /// Start timestamp.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// End timestamp, once finished.
    #[must_use]
    pub const fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Record an intermediate value.
    ///
    /// Returns `false` if `step` was already reported; the first report wins.
    pub fn add_intermediate(&mut self, step: u64, value: f64) -> bool {
        match self
            .intermediate_values
            .binary_search_by_key(&step, IntermediateValue::step)
        {
            Ok(_) => false,
            Err(pos) => {
                self.intermediate_values
                    .insert(pos, IntermediateValue::new(self.number, step, value));
                true
            }
        }
    }

    /// Finish the trial with the given final state and value.
    ///
    /// Sets the `ended_at` timestamp to now.
    pub fn finish(&mut self, state: TrialState, value: Option<f64>) {
        self.state = state;
        self.value = value;
        self.ended_at = Some(Utc::now());
    }
}
