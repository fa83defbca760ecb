//! Integration tests for the disaster monitor
//! 
//! Runs the full train-then-monitor flow against real SQLite stores.

use disaster_monitor::{
    cli::Config,
    execution::{execute_monitoring, train_model},
    monitor::FixedClock,
    store::AlertStore,
    telemetry::{NullReporter, TelemetryCollector},
    Prediction,
};
use tempfile::TempDir;

fn quick_config(iterations: usize, seed: u64) -> Config {
    let mut config = Config::default();
    config.monitor.iterations = iterations;
    config.monitor.delay_ms = 0;
    config.monitor.seed = Some(seed);
    config
}

fn clock() -> FixedClock {
    FixedClock("2024-06-01 12:00:00".to_string())
}

#[tokio::test]
async fn test_store_rows_match_disaster_predictions() {
    let config = quick_config(25, 2024);
    let (forest, _) = train_model(&config, 2024, |_| {}).unwrap();
    let store = AlertStore::open_in_memory().unwrap();
    let mut telemetry = TelemetryCollector::new();

    let summary = execute_monitoring(&config, &forest, &store, clock(), 2024, &mut telemetry)
        .await
        .unwrap();

    assert_eq!(summary.iterations(), 25);
    assert_eq!(store.count().unwrap(), summary.disasters());
    assert_eq!(telemetry.stats().alerts_logged, telemetry.stats().disasters);

    let stored = store.all().unwrap();
    let logged: Vec<_> = summary.alerts().cloned().collect();
    assert_eq!(stored, logged);
}

#[tokio::test]
async fn test_every_prediction_is_binary() {
    let config = quick_config(40, 5);
    let (forest, _) = train_model(&config, 5, |_| {}).unwrap();
    let store = AlertStore::open_in_memory().unwrap();

    let summary = execute_monitoring(&config, &forest, &store, clock(), 5, &mut NullReporter)
        .await
        .unwrap();

    for outcome in &summary.outcomes {
        assert!(Prediction::ALL.contains(&outcome.prediction));
        assert_eq!(outcome.alert.is_some(), outcome.prediction.is_disaster());
    }
}

#[tokio::test]
async fn test_fixed_seed_is_reproducible() {
    let config = quick_config(10, 99);

    let mut runs = Vec::new();
    for _ in 0..2 {
        let (forest, _) = train_model(&config, 99, |_| {}).unwrap();
        let store = AlertStore::open_in_memory().unwrap();
        let mut telemetry = TelemetryCollector::new();
        let summary = execute_monitoring(&config, &forest, &store, clock(), 99, &mut telemetry)
            .await
            .unwrap();
        runs.push((summary, telemetry.predictions()));
    }

    assert_eq!(runs[0], runs[1]);
}

#[tokio::test]
async fn test_zero_iterations_leave_empty_dump() {
    let config = quick_config(0, 1);
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("disaster_alerts.db");

    let (forest, _) = train_model(&config, 1, |_| {}).unwrap();
    let store = AlertStore::open(&path).unwrap();
    let summary = execute_monitoring(&config, &forest, &store, clock(), 1, &mut NullReporter)
        .await
        .unwrap();

    assert_eq!(summary.iterations(), 0);
    assert!(store.all().unwrap().is_empty());
    store.close().unwrap();
}

#[tokio::test]
async fn test_alerts_accumulate_across_runs() {
    let config = quick_config(15, 31);
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("disaster_alerts.db");
    let (forest, _) = train_model(&config, 31, |_| {}).unwrap();

    let mut total = 0;
    for _ in 0..2 {
        let store = AlertStore::open(&path).unwrap();
        let summary = execute_monitoring(&config, &forest, &store, clock(), 31, &mut NullReporter)
            .await
            .unwrap();
        total += summary.disasters();
        assert_eq!(store.count().unwrap(), total);
        store.close().unwrap();
    }
}
