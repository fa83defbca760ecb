//! Scenario tests on the sample training set

use disaster_monitor::{
    cli::Config,
    execution::train_model,
    monitor::{FixedClock, Monitor, MonitorConfig},
    store::AlertStore,
    Classifier, Dataset, ForestConfig, Prediction, RandomForest, Reading,
};

#[test]
fn test_hot_dry_windy_reading_is_a_disaster() {
    let data = Dataset::sample().unwrap();
    let store = AlertStore::open_in_memory().unwrap();

    for seed in [0, 1, 42, 1234] {
        let mut forest = RandomForest::new(ForestConfig::default(), seed);
        forest.fit(data.rows(), data.labels()).unwrap();
        assert_eq!(
            forest.predict(&[45.0, 20.0, 60.0]).unwrap(),
            Prediction::Disaster,
            "seed {}",
            seed
        );
    }

    let mut forest = RandomForest::new(ForestConfig::default(), 7);
    forest.fit(data.rows(), data.labels()).unwrap();
    let monitor = Monitor::new(&forest, &store, MonitorConfig::default())
        .with_clock(FixedClock("2024-06-01 08:00:00".to_string()));

    let before = store.count().unwrap();
    let outcome = monitor
        .process(1, Reading::new(45.0, 20.0, 60.0, "Kolkata"))
        .unwrap();

    assert!(outcome.prediction.is_disaster());
    assert_eq!(store.count().unwrap(), before + 1);
    assert_eq!(store.all().unwrap()[0].location, "Kolkata");
}

#[test]
fn test_split_model_still_flags_scenario() {
    let config = Config::default();
    for seed in [3, 17, 256] {
        let (forest, report) = train_model(&config, seed, |_| {}).unwrap();
        assert_eq!(report.train_rows + report.test_rows, 7);
        assert_eq!(
            forest.predict(&[45.0, 20.0, 60.0]).unwrap(),
            Prediction::Disaster
        );
    }
}
