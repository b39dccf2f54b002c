//! # trial-prune: Early Stopping for Hyperparameter Search
//!
//! **Version**: 0.1.0
//!
//! trial-prune connects a hyperparameter-search trial to a training loop.
//! After each epoch the [`PruningCallback`] reports a monitored metric to the
//! trial and asks whether to continue; unpromising trials stop with
//! [`Error::TrialPruned`].
//!
//! ## Design Principles (Toyota Way Aligned)
//!
//! - **Muda elimination**: Bad trials stop early instead of burning epochs
//! - **Poka-Yoke safety**: Construction validates config and backend availability
//! - **Jidoka**: Pruning is a distinct error variant, never a silent flag
//!
//! ## Example Usage
//!
//! ```rust
//! use trial_prune::callback::{CallbackManager, PruningCallback};
//! use trial_prune::study::{Direction, MedianPruner, Study};
//! use trial_prune::train::Trainer;
//! use trial_prune::Logs;
//!
//! # if !trial_prune::availability::TRAINER.is_available() { return Ok(()); }
//! let mut study = Study::new(Direction::Minimize, MedianPruner::default());
//! study.optimize(4, |trial| {
//!     let mut callbacks = CallbackManager::new();
//!     callbacks.add(PruningCallback::new(&mut *trial, "val_loss")?);
//!     let summary = Trainer::new(5)?.fit(&mut callbacks, |epoch| {
//!         Ok(Logs::new().with("val_loss", 1.0 / (epoch as f64 + 1.0)))
//!     })?;
//!     summary.last_logs.get("val_loss").map_or(Ok(f64::NAN), |v| v.to_f64("val_loss"))
//! })?;
//! assert!(study.best_trial().is_some());
//! # Ok::<(), trial_prune::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod availability;
pub mod callback;
pub mod config;
pub mod error;
pub mod logging;
pub mod logs;
pub mod study;
pub mod train;

pub use callback::{EpochOutcome, PruningCallback, TrainerCallback, Trial};
pub use config::PruningConfig;
pub use error::{Error, Result};
pub use logs::{Logs, MetricValue};
