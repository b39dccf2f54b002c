//! PruningCallback behaviour tests
//!
//! Covers the interval gate, missing-metric warnings, reporting, prune
//! signalling and backend availability.
//!
//! Everything except the availability check needs the `trainer` backend;
//! `cargo test --no-default-features` runs that check on its own.

#![cfg_attr(not(feature = "trainer"), allow(unused_imports, dead_code))]

use std::io::Write;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;
use trial_prune::callback::{CallbackManager, EpochOutcome, PruningCallback, TrainerCallback, Trial};
use trial_prune::train::Trainer;
use trial_prune::{Error, Logs, PruningConfig};

// =============================================================================
// Test doubles
// =============================================================================

/// Trial that records reports and answers prune queries from a fixed flag.
#[derive(Debug, Default)]
struct RecordingTrial {
    reports: Vec<(f64, u64)>,
    prune: bool,
}

impl RecordingTrial {
    fn pruning() -> Self {
        Self {
            prune: true,
            ..Self::default()
        }
    }
}

impl Trial for RecordingTrial {
    fn report(&mut self, value: f64, step: u64) {
        self.reports.push((value, step));
    }

    fn should_prune(&self) -> bool {
        self.prune
    }
}

/// Shared buffer that collects formatted tracing output.
#[cfg(feature = "trainer")]
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

#[cfg(feature = "trainer")]
impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[cfg(feature = "trainer")]
impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(feature = "trainer")]
impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[cfg(feature = "trainer")]
fn with_captured_warnings<R>(f: impl FnOnce() -> R) -> (R, String) {
    let captured = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, captured.contents())
}

// =============================================================================
// Interval gate
// =============================================================================

#[cfg(feature = "trainer")]
#[test]
fn test_interval_three_checks_epochs_two_and_five() {
    let mut trial = RecordingTrial::default();
    let mut callback = PruningCallback::with_interval(&mut trial, "val_loss", 3).unwrap();

    let mut checked = Vec::new();
    for epoch in 0..6 {
        let logs = Logs::new().with("val_loss", 0.1);
        if callback.check_epoch(epoch, Some(&logs)).unwrap() != EpochOutcome::Skipped {
            checked.push(epoch);
        }
    }
    drop(callback);

    assert_eq!(checked, vec![2, 5]);
    assert_eq!(trial.reports, vec![(0.1, 2), (0.1, 5)]);
}

#[cfg(feature = "trainer")]
#[test]
fn test_interval_one_checks_every_epoch() {
    let mut trial = RecordingTrial::default();
    let mut callback = PruningCallback::new(&mut trial, "loss").unwrap();
    for epoch in 0..4 {
        callback
            .on_epoch_end(epoch, Some(&Logs::new().with("loss", 1.0)))
            .unwrap();
    }
    drop(callback);
    assert_eq!(trial.reports.len(), 4);
}

// =============================================================================
// Missing metric
// =============================================================================

#[cfg(feature = "trainer")]
#[test]
fn test_missing_metric_warns_without_reporting() {
    let mut trial = RecordingTrial::pruning();
    let logs = Logs::new().with("val_loss", 0.5);

    let (outcome, output) = with_captured_warnings(|| {
        let mut callback = PruningCallback::new(&mut trial, "val_accuracy").unwrap();
        callback.check_epoch(0, Some(&logs))
    });

    assert_eq!(outcome.unwrap(), EpochOutcome::MetricMissing);
    assert!(trial.reports.is_empty());
    assert!(output.contains("WARN"), "no warning emitted: {output:?}");
    assert!(output.contains("'val_accuracy'"), "warning does not name metric: {output:?}");
}

#[cfg(feature = "trainer")]
#[test]
fn test_missing_logs_warn_without_error() {
    let mut trial = RecordingTrial::pruning();
    let (result, output) = with_captured_warnings(|| {
        let mut callback = PruningCallback::new(&mut trial, "val_loss").unwrap();
        callback.on_epoch_end(0, None)
    });

    assert!(result.is_ok());
    assert!(trial.reports.is_empty());
    assert!(output.contains("val_loss"));
}

// =============================================================================
// Report and prune
// =============================================================================

#[cfg(feature = "trainer")]
#[test]
fn test_reports_once_and_continues() {
    let mut trial = RecordingTrial::default();
    let logs = Logs::new().with("val_loss", 0.2);

    let mut callback = PruningCallback::new(&mut trial, "val_loss").unwrap();
    let outcome = callback.check_epoch(4, Some(&logs)).unwrap();
    drop(callback);

    assert_eq!(outcome, EpochOutcome::Reported { value: 0.2 });
    assert_eq!(trial.reports, vec![(0.2, 4)]);
}

#[cfg(feature = "trainer")]
#[test]
fn test_prune_raises_trial_pruned_with_epoch() {
    let mut trial = RecordingTrial::pruning();
    let logs = Logs::new().with("val_loss", 0.2);

    let mut callback = PruningCallback::new(&mut trial, "val_loss").unwrap();
    let err = callback.check_epoch(7, Some(&logs)).unwrap_err();
    drop(callback);

    assert!(err.is_pruned());
    assert!(matches!(err, Error::TrialPruned(_)));
    assert!(err.to_string().contains('7'));
    assert_eq!(trial.reports, vec![(0.2, 7)]);
}

#[cfg(feature = "trainer")]
#[test]
fn test_repeated_call_is_idempotent() {
    let mut trial = RecordingTrial::default();
    let logs = Logs::new().with("val_loss", 0.3);

    let mut callback = PruningCallback::new(&mut trial, "val_loss").unwrap();
    let first = callback.check_epoch(1, Some(&logs)).unwrap();
    let second = callback.check_epoch(1, Some(&logs)).unwrap();
    drop(callback);

    assert_eq!(first, second);
    assert_eq!(trial.reports, vec![(0.3, 1), (0.3, 1)]);
}

#[cfg(feature = "trainer")]
#[test]
fn test_integer_and_text_metrics_coerced() {
    let mut trial = RecordingTrial::default();
    let mut callback = PruningCallback::new(&mut trial, "score").unwrap();
    callback
        .check_epoch(0, Some(&Logs::new().with("score", 3_i64)))
        .unwrap();
    callback
        .check_epoch(1, Some(&Logs::new().with("score", "0.25")))
        .unwrap();
    drop(callback);
    assert_eq!(trial.reports, vec![(3.0, 0), (0.25, 1)]);
}

#[cfg(feature = "trainer")]
#[test]
fn test_non_numeric_metric_propagates_conversion_error() {
    let mut trial = RecordingTrial::default();
    let mut callback = PruningCallback::new(&mut trial, "val_loss").unwrap();
    let err = callback
        .check_epoch(0, Some(&Logs::new().with("val_loss", "n/a")))
        .unwrap_err();
    drop(callback);

    assert!(!err.is_pruned());
    assert!(err.to_string().contains("val_loss"));
    assert!(trial.reports.is_empty());
}

// =============================================================================
// Construction
// =============================================================================

#[cfg(feature = "trainer")]
#[test]
fn test_from_config() {
    let config = PruningConfig::from_json(r#"{"monitor": "val_accuracy", "interval": 2}"#).unwrap();
    let callback = PruningCallback::from_config(RecordingTrial::default(), &config).unwrap();
    assert_eq!(callback.monitor(), "val_accuracy");
    assert_eq!(callback.interval(), 2);
}

#[cfg(feature = "trainer")]
#[test]
fn test_construction_succeeds_with_trainer_backend() {
    assert!(PruningCallback::new(RecordingTrial::default(), "loss").is_ok());
}

#[cfg(not(feature = "trainer"))]
#[test]
fn test_construction_fails_without_trainer_backend() {
    let err = PruningCallback::new(RecordingTrial::default(), "loss").unwrap_err();
    assert!(matches!(err, Error::Unavailable { backend: "trainer", .. }));
}

// =============================================================================
// Inside a training loop
// =============================================================================

#[cfg(feature = "trainer")]
#[test]
fn test_prune_terminates_training_loop() {
    let mut trial = RecordingTrial::default();
    let trainer = Trainer::new(10).unwrap();
    let mut epochs_seen = 0;

    {
        let mut callbacks = CallbackManager::new();
        callbacks.add(PruningCallback::new(&mut trial, "val_loss").unwrap());
        let summary = trainer
            .fit(&mut callbacks, |_| {
                epochs_seen += 1;
                Ok(Logs::new().with("val_loss", 0.5))
            })
            .unwrap();
        assert_eq!(summary.epochs_run, 10);
    }
    assert_eq!(trial.reports.len(), 10);

    trial.prune = true;
    let mut callbacks = CallbackManager::new();
    callbacks.add(PruningCallback::new(&mut trial, "val_loss").unwrap());
    let err = trainer
        .fit(&mut callbacks, |_| Ok(Logs::new().with("val_loss", 0.5)))
        .unwrap_err();

    assert!(err.is_pruned());
    assert_eq!(err.to_string(), "Trial was pruned at epoch 0.");
    assert_eq!(epochs_seen, 10);
}
