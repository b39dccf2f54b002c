//! Study execution: run an objective per trial and record the outcome

use super::pruner::{Direction, Pruner};
use super::store::StudyStore;
use super::trial_record::{IntermediateValue, TrialRecord, TrialState};
use crate::callback::Trial;
use crate::Result;

/// Handle given to the objective for the trial being evaluated.
///
/// Reports are recorded on the trial; prune decisions come from the study's
/// pruner with the already-finished trials as history.
pub struct TrialHandle<'s> {
    record: TrialRecord,
    pruner: &'s dyn Pruner,
    history: &'s [TrialRecord],
    direction: Direction,
}

impl<'s> TrialHandle<'s> {
    fn new(
        number: u64,
        pruner: &'s dyn Pruner,
        history: &'s [TrialRecord],
        direction: Direction,
    ) -> Self {
        Self {
            record: TrialRecord::new(number),
            pruner,
            history,
            direction,
        }
    }

    /// Trial number within the study.
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.record.number()
    }

    /// Values reported so far, ordered by step.
    #[must_use]
    pub fn intermediate_values(&self) -> &[IntermediateValue] {
        self.record.intermediate_values()
    }

    fn into_record(self) -> TrialRecord {
        self.record
    }
}

impl Trial for TrialHandle<'_> {
    fn report(&mut self, value: f64, step: u64) {
        if !self.record.add_intermediate(step, value) {
            tracing::warn!(
                trial = self.record.number(),
                step,
                "intermediate value already reported at step {step}; ignoring"
            );
        }
    }

    fn should_prune(&self) -> bool {
        let prune = self
            .pruner
            .prune(&self.record, self.history, self.direction);
        tracing::debug!(
            trial = self.record.number(),
            pruner = self.pruner.name(),
            prune,
            "prune decision"
        );
        prune
    }
}

/// A sequence of trials sharing an optimization direction and pruner.
///
/// # Example
///
/// ```rust
/// use trial_prune::callback::Trial;
/// use trial_prune::study::{Direction, MedianPruner, Study, TrialState};
/// use trial_prune::Error;
///
/// let mut study = Study::new(Direction::Minimize, MedianPruner::default());
/// study.optimize(3, |trial| {
///     for epoch in 0..5 {
///         trial.report(1.0 / (epoch as f64 + 1.0), epoch);
///         if trial.should_prune() {
///             return Err(Error::pruned_at_epoch(epoch));
///         }
///     }
///     Ok(0.2)
/// })?;
/// assert_eq!(study.trials_with_state(TrialState::Complete).len(), 3);
/// # Ok::<(), trial_prune::Error>(())
/// ```
pub struct Study {
    direction: Direction,
    pruner: Box<dyn Pruner>,
    store: StudyStore,
}

impl Study {
    /// Create an empty study.
    #[must_use]
    pub fn new<P: Pruner + 'static>(direction: Direction, pruner: P) -> Self {
        Self {
            direction,
            pruner: Box::new(pruner),
            store: StudyStore::new(),
        }
    }

    /// Optimization direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Finished trials.
    #[must_use]
    pub const fn store(&self) -> &StudyStore {
        &self.store
    }

    /// All finished trials in creation order.
    #[must_use]
    pub fn trials(&self) -> &[TrialRecord] {
        self.store.trials()
    }

    /// Finished trials in the given state.
    #[must_use]
    pub fn trials_with_state(&self, state: TrialState) -> Vec<&TrialRecord> {
        self.store.trials_with_state(state)
    }

    /// Best completed trial.
    #[must_use]
    pub fn best_trial(&self) -> Option<&TrialRecord> {
        self.store.best_trial(self.direction)
    }

    /// Run `n_trials` evaluations of `objective`.
    ///
    /// - `Ok(value)` completes the trial (a NaN value fails it instead).
    /// - A pruning error marks the trial pruned with its last reported value
    ///   and the study moves on.
    ///
    /// # Errors
    ///
    /// Any other objective error marks the trial failed and is returned.
    pub fn optimize<F>(&mut self, n_trials: usize, mut objective: F) -> Result<()>
    where
        F: FnMut(&mut TrialHandle<'_>) -> Result<f64>,
    {
        for _ in 0..n_trials {
            let number = self.store.next_number();
            let mut handle =
                TrialHandle::new(number, self.pruner.as_ref(), self.store.trials(), self.direction);
            let outcome = objective(&mut handle);
            let mut record = handle.into_record();

            let failure = match outcome {
                Ok(value) if value.is_nan() => {
                    tracing::warn!(trial = number, "objective returned NaN; marking trial failed");
                    record.finish(TrialState::Fail, None);
                    None
                }
                Ok(value) => {
                    tracing::info!(trial = number, value, "trial complete");
                    record.finish(TrialState::Complete, Some(value));
                    None
                }
                Err(err) if err.is_pruned() => {
                    let last = record.last_intermediate().map(IntermediateValue::value);
                    tracing::info!(trial = number, reason = %err, "trial pruned");
                    record.finish(TrialState::Pruned, last);
                    None
                }
                Err(err) => {
                    tracing::warn!(trial = number, error = %err, "trial failed");
                    record.finish(TrialState::Fail, None);
                    Some(err)
                }
            };

            self.store.add_trial(record);
            if let Some(err) = failure {
                return Err(err);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::study::{NopPruner, ThresholdPruner};
    use crate::Error;

    #[test]
    fn test_duplicate_report_ignored() {
        let mut study = Study::new(Direction::Minimize, NopPruner);
        study
            .optimize(1, |trial| {
                trial.report(0.5, 0);
                trial.report(0.1, 0);
                assert_eq!(trial.intermediate_values().len(), 1);
                Ok(0.5)
            })
            .unwrap();
        assert_eq!(study.trials()[0].intermediate_at(0), Some(0.5));
    }

    #[test]
    fn test_pruned_trial_keeps_last_value() {
        let pruner = ThresholdPruner::new(None, Some(1.0), 0).unwrap();
        let mut study = Study::new(Direction::Minimize, pruner);
        study
            .optimize(1, |trial| {
                trial.report(0.5, 0);
                trial.report(2.0, 1);
                if trial.should_prune() {
                    return Err(Error::pruned_at_epoch(1));
                }
                Ok(0.0)
            })
            .unwrap();

        let record = &study.trials()[0];
        assert_eq!(record.state(), TrialState::Pruned);
        assert_eq!(record.value(), Some(2.0));
    }

    #[test]
    fn test_nan_objective_fails_trial() {
        let mut study = Study::new(Direction::Maximize, NopPruner);
        study.optimize(2, |_| Ok(f64::NAN)).unwrap();
        assert_eq!(study.trials_with_state(TrialState::Fail).len(), 2);
        assert!(study.best_trial().is_none());
    }

    #[test]
    fn test_objective_error_stops_study() {
        let mut study = Study::new(Direction::Minimize, NopPruner);
        let err = study
            .optimize(5, |trial| {
                if trial.number() == 1 {
                    Err(Error::Other("diverged".into()))
                } else {
                    Ok(1.0)
                }
            })
            .unwrap_err();

        assert!(!err.is_pruned());
        assert_eq!(study.trials().len(), 2);
        assert_eq!(study.trials()[1].state(), TrialState::Fail);
    }
}
