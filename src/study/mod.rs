//! In-memory hyperparameter study
//!
//! A minimal optimization host for driving [`crate::callback::PruningCallback`]:
//! trials report intermediate values, a pruner decides whether they stop,
//! and finished trials are kept in a [`StudyStore`].
//!
//! ## Schema Overview
//!
//! ```text
//! Study (1) ──< TrialRecord (N)
//!                   │
//!                   └──< IntermediateValue (N) [ordered by step]
//! ```

mod core;
mod pruner;
mod store;
mod trial_record;

pub use self::core::{Study, TrialHandle};
pub use pruner::{Direction, MedianPruner, NopPruner, Pruner, ThresholdPruner};
pub use store::StudyStore;
pub use trial_record::{IntermediateValue, TrialRecord, TrialState};
