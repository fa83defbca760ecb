//! Shared training and monitoring steps
//!
//! Trains the forest on the sample set and drives the monitor loop against
//! an already opened alert store. Used by the binary and the integration
//! tests.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::Config;
use crate::errors::Result;
use crate::model::{evaluate, Dataset, RandomForest, TrainingReport};
use crate::monitor::seeding::{self, SeedStream};
use crate::monitor::{Clock, Monitor, MonitorConfig, ReadingGenerator, RunSummary};
use crate::store::AlertStore;
use crate::telemetry::Reporter;

/// Split the sample set, fit the forest and score it on the held-out rows
///
/// `on_tree` is called with the number of trees grown so far.
pub fn train_model<F>(config: &Config, seed: u64, on_tree: F) -> Result<(RandomForest, TrainingReport)>
where
    F: FnMut(usize),
{
    let dataset = Dataset::sample()?;
    let mut split_rng = StdRng::seed_from_u64(seeding::derive(seed, SeedStream::Split));
    let (train, test) = dataset.train_test_split(config.model.test_fraction, &mut split_rng)?;

    let mut forest = RandomForest::new(
        config.model.forest(),
        seeding::derive(seed, SeedStream::Forest),
    );
    forest.fit_with_progress(train.rows(), train.labels(), on_tree)?;
    let accuracy = evaluate(&forest, &test)?;

    let report = TrainingReport {
        train_rows: train.len(),
        test_rows: test.len(),
        accuracy,
    };
    tracing::info!(
        seed,
        trees = forest.n_trees(),
        train_rows = report.train_rows,
        test_rows = report.test_rows,
        accuracy = ?report.accuracy,
        "model trained"
    );
    Ok((forest, report))
}

/// Run the monitor loop with readings seeded from `seed`
pub async fn execute_monitoring<K, R>(
    config: &Config,
    forest: &RandomForest,
    store: &AlertStore,
    clock: K,
    seed: u64,
    reporter: &mut R,
) -> Result<RunSummary>
where
    K: Clock,
    R: Reporter + ?Sized,
{
    let mut readings = ReadingGenerator::from_config(
        seeding::derive(seed, SeedStream::Readings),
        &config.sensors,
        &config.monitor,
    )?;

    let monitor = Monitor::new(forest, store, MonitorConfig::from(&config.monitor)).with_clock(clock);
    tracing::info!(
        iterations = monitor.config().iterations,
        delay_ms = monitor.config().delay.as_millis() as u64,
        "starting monitor loop"
    );

    monitor.run(&mut readings, reporter).await
}
