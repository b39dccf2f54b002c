//! Backend availability checks
//!
//! Availability is fixed at build time by Cargo features, mirroring how
//! optional backends are gated (`gpu`, `compression`). Code that depends on a
//! backend checks it at construction so failure is immediate and explicit.

use crate::{Error, Result};

/// A compile-time backend capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    backend: &'static str,
    available: bool,
    hint: &'static str,
}

/// Training-loop backend, enabled by the `trainer` feature.
pub const TRAINER: Availability = Availability::new(
    "trainer",
    cfg!(feature = "trainer"),
    "Rebuild with `--features trainer` to use PruningCallback",
);

impl Availability {
    /// Describe a backend capability.
    #[must_use]
    pub const fn new(backend: &'static str, available: bool, hint: &'static str) -> Self {
        Self {
            backend,
            available,
            hint,
        }
    }

    /// Backend name.
    #[must_use]
    pub const fn backend(&self) -> &'static str {
        self.backend
    }

    /// Whether the backend was compiled in.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.available
    }

    /// Fail with [`Error::Unavailable`] unless the backend is present.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unavailable` if the backend was not compiled in.
    pub const fn check(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(Error::Unavailable {
                backend: self.backend,
                hint: self.hint,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_backend_fails_check() {
        let missing = Availability::new("keras", false, "install it");
        let err = missing.check().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("keras backend is not available"));
        assert!(msg.contains("install it"));
    }

    #[test]
    fn test_present_backend_passes_check() {
        let present = Availability::new("keras", true, "");
        assert!(present.check().is_ok());
        assert!(present.is_available());
        assert_eq!(present.backend(), "keras");
    }

    #[test]
    fn test_trainer_matches_feature() {
        assert_eq!(TRAINER.is_available(), cfg!(feature = "trainer"));
    }
}
