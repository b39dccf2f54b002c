//! Study Store - in-memory storage for finished trials
//!
//! Trials are stored in creation order, so a trial's number is its index.

use serde::{Deserialize, Serialize};

use super::pruner::Direction;
use super::trial_record::{IntermediateValue, TrialRecord, TrialState};

/// In-memory store of finished trials for one study.
///
/// ## Design
///
/// Trial numbers are assigned densely from zero, so lookups by number are
/// O(1) vector indexing. The whole store serializes to JSON for snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StudyStore {
    trials: Vec<TrialRecord>,
}

impl StudyStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the store has no trials.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// Get the number of trials in the store.
    #[must_use]
    pub fn trial_count(&self) -> usize {
        self.trials.len()
    }

    /// Number the next trial will receive.
    #[must_use]
    pub fn next_number(&self) -> u64 {
        self.trials.len() as u64
    }

    /// All trials in creation order.
    #[must_use]
    pub fn trials(&self) -> &[TrialRecord] {
        &self.trials
    }

    /// Add a finished trial.
    ///
    /// The record keeps its own number; callers take it from
    /// [`StudyStore::next_number`].
    pub fn add_trial(&mut self, trial: TrialRecord) {
        debug_assert_eq!(trial.number(), self.next_number());
        self.trials.push(trial);
    }

    /// Get a trial by number.
    #[must_use]
    pub fn get_trial(&self, number: u64) -> Option<&TrialRecord> {
        usize::try_from(number).ok().and_then(|i| self.trials.get(i))
    }

    /// Trials in the given state.
    #[must_use]
    pub fn trials_with_state(&self, state: TrialState) -> Vec<&TrialRecord> {
        self.trials.iter().filter(|t| t.state() == state).collect()
    }

    /// Intermediate values of a trial, ordered by step.
    #[must_use]
    pub fn intermediate_values(&self, number: u64) -> &[IntermediateValue] {
        self.get_trial(number)
            .map(TrialRecord::intermediate_values)
            .unwrap_or_default()
    }

    /// Best completed trial for the given direction.
    ///
    /// NaN values never win.
    #[must_use]
    pub fn best_trial(&self, direction: Direction) -> Option<&TrialRecord> {
        self.trials
            .iter()
            .filter(|t| t.state() == TrialState::Complete)
            .filter(|t| t.value().is_some_and(|v| !v.is_nan()))
            .reduce(|best, t| match (t.value(), best.value()) {
                (Some(a), Some(b)) if direction.is_better(a, b) => t,
                _ => best,
            })
    }
}
