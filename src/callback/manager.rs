//! Callback manager for dispatching events to multiple callbacks

use super::traits::TrainerCallback;
use crate::logs::Logs;
use crate::Result;

/// Manages multiple callbacks and dispatches events in registration order
#[derive(Default)]
pub struct CallbackManager<'a> {
    callbacks: Vec<Box<dyn TrainerCallback + 'a>>,
}

impl<'a> CallbackManager<'a> {
    /// Create new callback manager
    #[must_use]
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Add a callback
    pub fn add<C: TrainerCallback + 'a>(&mut self, callback: C) {
        self.callbacks.push(Box::new(callback));
    }

    /// Check if no callbacks are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Get number of callbacks
    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Names of registered callbacks, in dispatch order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.callbacks.iter().map(|cb| cb.name()).collect()
    }

    /// Fire train begin event
    ///
    /// # Errors
    ///
    /// Returns the first callback error.
    pub fn on_train_begin(&mut self) -> Result<()> {
        for cb in &mut self.callbacks {
            cb.on_train_begin()?;
        }
        Ok(())
    }

    /// Fire train end event
    pub fn on_train_end(&mut self) {
        for cb in &mut self.callbacks {
            cb.on_train_end();
        }
    }

    /// Fire epoch end event
    ///
    /// # Errors
    ///
    /// Returns the first callback error; later callbacks are not called.
    pub fn on_epoch_end(&mut self, epoch: u64, logs: Option<&Logs>) -> Result<()> {
        for cb in &mut self.callbacks {
            if let Err(err) = cb.on_epoch_end(epoch, logs) {
                tracing::debug!(callback = cb.name(), epoch, error = %err, "callback stopped epoch");
                return Err(err);
            }
        }
        Ok(())
    }
}
