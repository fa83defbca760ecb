//! Monitor loop
//!
//! For each simulated reading: classify, append an alert on a disaster,
//! report, then pause. Errors from the classifier or the store abort the
//! run; nothing is retried.

pub mod clock;
pub mod generator;
pub mod seeding;

pub use clock::{Clock, FixedClock, SystemClock};
pub use generator::ReadingGenerator;
pub use seeding::SeedStream;

use std::time::Duration;

use crate::cli::config::MonitorSettings;
use crate::errors::Result;
use crate::model::Classifier;
use crate::store::AlertStore;
use crate::telemetry::{MonitorEvent, Reporter};
use crate::types::{AlertRecord, NewAlert, Prediction, Reading};

/// Loop parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    pub iterations: usize,
    pub delay: Duration,
    pub disaster_type: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::from(&MonitorSettings::default())
    }
}

impl From<&MonitorSettings> for MonitorConfig {
    fn from(settings: &MonitorSettings) -> Self {
        Self {
            iterations: settings.iterations,
            delay: Duration::from_millis(settings.delay_ms),
            disaster_type: settings.disaster_type.clone(),
        }
    }
}

/// What happened to one reading
#[derive(Debug, Clone, PartialEq)]
pub struct IterationOutcome {
    pub iteration: usize,
    pub reading: Reading,
    pub prediction: Prediction,
    /// Set iff the prediction was a disaster
    pub alert: Option<AlertRecord>,
}

/// Totals for a finished run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub outcomes: Vec<IterationOutcome>,
}

impl RunSummary {
    pub fn iterations(&self) -> usize {
        self.outcomes.len()
    }

    pub fn disasters(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.prediction.is_disaster())
            .count()
    }

    pub fn alerts(&self) -> impl Iterator<Item = &AlertRecord> {
        self.outcomes.iter().filter_map(|o| o.alert.as_ref())
    }
}

/// Drives readings through a classifier into the alert store
pub struct Monitor<'a, C: ?Sized, K = SystemClock> {
    classifier: &'a C,
    store: &'a AlertStore,
    clock: K,
    config: MonitorConfig,
}

impl<'a, C: Classifier + ?Sized> Monitor<'a, C, SystemClock> {
    pub fn new(classifier: &'a C, store: &'a AlertStore, config: MonitorConfig) -> Self {
        Self {
            classifier,
            store,
            clock: SystemClock,
            config,
        }
    }
}

impl<'a, C: Classifier + ?Sized, K: Clock> Monitor<'a, C, K> {
    /// Replace the timestamp source
    pub fn with_clock<K2: Clock>(self, clock: K2) -> Monitor<'a, C, K2> {
        Monitor {
            classifier: self.classifier,
            store: self.store,
            clock,
            config: self.config,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Classify one reading and append an alert if it is a disaster
    pub fn process(&self, iteration: usize, reading: Reading) -> Result<IterationOutcome> {
        let prediction = self.classifier.predict(&reading.features())?;

        let alert = if prediction.is_disaster() {
            let alert = NewAlert::new(
                self.config.disaster_type.clone(),
                reading.location.clone(),
                self.clock.timestamp(),
            );
            Some(self.store.append(&alert)?)
        } else {
            None
        };

        tracing::debug!(
            iteration,
            temperature = reading.temperature,
            humidity = reading.humidity,
            wind_speed = reading.wind_speed,
            location = %reading.location,
            prediction = %prediction,
            "reading classified"
        );

        Ok(IterationOutcome {
            iteration,
            reading,
            prediction,
            alert,
        })
    }

    /// Run the configured number of iterations
    pub async fn run<G, R>(&self, readings: &mut G, reporter: &mut R) -> Result<RunSummary>
    where
        G: Iterator<Item = Reading>,
        R: Reporter + ?Sized,
    {
        let mut summary = RunSummary::default();

        for iteration in 1..=self.config.iterations {
            let Some(reading) = readings.next() else {
                tracing::warn!(iteration, "reading source exhausted");
                break;
            };

            let outcome = self.process(iteration, reading)?;

            reporter.report(&MonitorEvent::ReadingClassified {
                iteration,
                reading: outcome.reading.clone(),
                prediction: outcome.prediction,
            });
            if let Some(record) = &outcome.alert {
                reporter.report(&MonitorEvent::AlertLogged {
                    record: record.clone(),
                });
            }
            summary.outcomes.push(outcome);

            if iteration < self.config.iterations && !self.config.delay.is_zero() {
                tokio::time::sleep(self.config.delay).await;
            }
        }

        reporter.report(&MonitorEvent::RunFinished {
            iterations: summary.iterations(),
            disasters: summary.disasters(),
        });
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MonitorError;
    use crate::model::{Dataset, ForestConfig, RandomForest};
    use crate::telemetry::TelemetryCollector;

    /// Disaster whenever humidity is below 50
    struct HumidityRule;

    impl Classifier for HumidityRule {
        fn fit(&mut self, _features: &[Vec<f64>], _labels: &[Prediction]) -> Result<()> {
            Ok(())
        }

        fn predict(&self, features: &[f64]) -> Result<Prediction> {
            Ok(if features[1] < 50.0 {
                Prediction::Disaster
            } else {
                Prediction::NoDisaster
            })
        }
    }

    struct Broken;

    impl Classifier for Broken {
        fn fit(&mut self, _features: &[Vec<f64>], _labels: &[Prediction]) -> Result<()> {
            Ok(())
        }

        fn predict(&self, _features: &[f64]) -> Result<Prediction> {
            Err(MonitorError::NotFitted)
        }
    }

    fn config(iterations: usize) -> MonitorConfig {
        MonitorConfig {
            iterations,
            delay: Duration::ZERO,
            disaster_type: "Generic Disaster".to_string(),
        }
    }

    #[test]
    fn test_scenario_reading_logs_one_alert() {
        let data = Dataset::sample().unwrap();
        let mut forest = RandomForest::new(ForestConfig::default(), 42);
        forest.fit(data.rows(), data.labels()).unwrap();
        let store = AlertStore::open_in_memory().unwrap();

        let monitor = Monitor::new(&forest, &store, config(1))
            .with_clock(FixedClock("2024-06-01 09:30:00".to_string()));
        let outcome = monitor
            .process(1, Reading::new(45.0, 20.0, 60.0, "Chennai"))
            .unwrap();

        assert_eq!(outcome.prediction, Prediction::Disaster);
        let alerts = store.all().unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].disaster_type, "Generic Disaster");
        assert_eq!(alerts[0].location, "Chennai");
        assert_eq!(alerts[0].timestamp, "2024-06-01 09:30:00");
        assert_eq!(outcome.alert.as_ref(), Some(&alerts[0]));
    }

    #[test]
    fn test_no_alert_without_disaster() {
        let store = AlertStore::open_in_memory().unwrap();
        let monitor = Monitor::new(&HumidityRule, &store, config(1));
        let outcome = monitor
            .process(1, Reading::new(30.0, 90.0, 20.0, "Mumbai"))
            .unwrap();

        assert_eq!(outcome.prediction, Prediction::NoDisaster);
        assert!(outcome.alert.is_none());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_run_alerts_iff_disaster() {
        let store = AlertStore::open_in_memory().unwrap();
        let monitor = Monitor::new(&HumidityRule, &store, config(4));
        let mut readings = vec![
            Reading::new(30.0, 20.0, 20.0, "Delhi"),
            Reading::new(30.0, 80.0, 20.0, "Mumbai"),
            Reading::new(30.0, 10.0, 20.0, "Kolkata"),
            Reading::new(30.0, 60.0, 20.0, "Chennai"),
        ]
        .into_iter();
        let mut collector = TelemetryCollector::new();

        let summary = tokio_test::block_on(monitor.run(&mut readings, &mut collector)).unwrap();

        assert_eq!(summary.iterations(), 4);
        assert_eq!(summary.disasters(), 2);
        for outcome in &summary.outcomes {
            assert_eq!(outcome.alert.is_some(), outcome.prediction.is_disaster());
        }
        let locations: Vec<String> = store.all().unwrap().into_iter().map(|a| a.location).collect();
        assert_eq!(locations, vec!["Delhi", "Kolkata"]);
        assert_eq!(collector.stats().alerts_logged, 2);
        assert!(matches!(
            collector.events().last(),
            Some(MonitorEvent::RunFinished { iterations: 4, disasters: 2 })
        ));
    }

    #[test]
    fn test_zero_iterations() {
        let store = AlertStore::open_in_memory().unwrap();
        let monitor = Monitor::new(&HumidityRule, &store, config(0));
        let mut readings = std::iter::repeat(Reading::new(30.0, 20.0, 20.0, "Delhi"));

        let summary =
            tokio_test::block_on(monitor.run(&mut readings, &mut crate::telemetry::NullReporter))
                .unwrap();

        assert_eq!(summary.iterations(), 0);
        assert!(store.all().unwrap().is_empty());
    }

    #[test]
    fn test_classifier_error_aborts() {
        let store = AlertStore::open_in_memory().unwrap();
        let monitor = Monitor::new(&Broken, &store, config(3));
        let mut readings = std::iter::repeat(Reading::new(30.0, 20.0, 20.0, "Delhi"));

        let result =
            tokio_test::block_on(monitor.run(&mut readings, &mut crate::telemetry::NullReporter));

        assert!(matches!(result, Err(MonitorError::NotFitted)));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_default_config_matches_settings() {
        let config = MonitorConfig::default();
        assert_eq!(config.iterations, 5);
        assert_eq!(config.delay, Duration::from_secs(1));
        assert_eq!(config.disaster_type, "Generic Disaster");
    }
}
