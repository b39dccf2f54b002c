//! Callback system for training events
//!
//! Provides the hooks a training loop fires and the pruning callback that
//! connects those hooks to a hyperparameter-search [`Trial`]:
//! - `on_train_begin` / `on_train_end`
//! - `on_epoch_end`
//!
//! # Example
//!
//! ```rust
//! use trial_prune::callback::{CallbackManager, TrainerCallback};
//! use trial_prune::{Logs, Result};
//!
//! struct PrintCallback;
//!
//! impl TrainerCallback for PrintCallback {
//!     fn on_epoch_end(&mut self, epoch: u64, logs: Option<&Logs>) -> Result<()> {
//!         println!("Epoch {epoch} finished with {} metrics", logs.map_or(0, Logs::len));
//!         Ok(())
//!     }
//! }
//!
//! let mut manager = CallbackManager::new();
//! manager.add(PrintCallback);
//! manager.on_epoch_end(0, None)?;
//! # Ok::<(), trial_prune::Error>(())
//! ```

mod manager;
mod pruning;
mod traits;

pub use manager::CallbackManager;
pub use pruning::{EpochOutcome, PruningCallback};
pub use traits::{TrainerCallback, Trial};
