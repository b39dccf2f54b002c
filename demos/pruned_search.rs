//! Pruned hyperparameter search demo
//!
//! Searches a learning rate on a synthetic training curve. Each trial trains
//! for up to 20 epochs; a `PruningCallback` reports `val_loss` to the study
//! and the median pruner stops trials that fall behind.
//!
//! Run with: cargo run --example pruned_search
//! Verbose:  RUST_LOG=trial_prune=debug cargo run --example pruned_search

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trial_prune::callback::{CallbackManager, PruningCallback};
use trial_prune::study::{Direction, MedianPruner, Study, TrialState};
use trial_prune::train::Trainer;
use trial_prune::{logging, Logs, PruningConfig};

const EPOCHS: u64 = 20;
const TRIALS: usize = 30;

/// Synthetic validation loss: converges fastest near lr = 0.01.
fn val_loss(lr: f64, epoch: u64, noise: f64) -> f64 {
    let distance = (lr.log10() + 2.0).abs();
    let floor = 0.05 + 0.3 * distance;
    #[allow(clippy::cast_precision_loss)]
    let decay = (-(epoch as f64 + 1.0) * lr.sqrt() * 2.0).exp();
    floor + decay + noise
}

fn main() -> Result<()> {
    logging::init();

    let config = PruningConfig::from_json(r#"{"monitor": "val_loss", "interval": 1}"#)?;
    let mut rng = StdRng::seed_from_u64(42);
    let mut study = Study::new(Direction::Minimize, MedianPruner::new(5, 2, 1)?);

    println!("=== Pruned Search ===\n");
    study.optimize(TRIALS, |trial| {
        let lr = 10f64.powf(rng.gen_range(-4.0..-1.0));
        let mut callbacks = CallbackManager::new();
        callbacks.add(PruningCallback::from_config(&mut *trial, &config)?);

        let summary = Trainer::new(EPOCHS)?.fit(&mut callbacks, |epoch| {
            let loss = val_loss(lr, epoch, rng.gen_range(-0.01..0.01));
            Ok(Logs::new().with("val_loss", loss).with("lr", lr))
        })?;

        let final_loss = summary
            .last_logs
            .get(&config.monitor)
            .map_or(Ok(f64::NAN), |v| v.to_f64(&config.monitor))?;
        println!("  lr={lr:.5} -> val_loss={final_loss:.4}");
        Ok(final_loss)
    })?;

    let complete = study.trials_with_state(TrialState::Complete).len();
    let pruned = study.trials_with_state(TrialState::Pruned).len();
    println!("\nComplete: {complete}  Pruned: {pruned}");

    if let Some(best) = study.best_trial() {
        println!(
            "Best trial #{}: val_loss={:.4} after {} epochs",
            best.number(),
            best.value().unwrap_or(f64::NAN),
            best.intermediate_values().len()
        );
    }

    Ok(())
}
