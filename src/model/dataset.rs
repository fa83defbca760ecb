//! Training data and evaluation helpers

use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::{MonitorError, Result};
use crate::types::Prediction;

/// Labelled feature rows
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    rows: Vec<Vec<f64>>,
    labels: Vec<Prediction>,
}

impl Dataset {
    /// Build a dataset, checking that rows and labels line up
    pub fn new(rows: Vec<Vec<f64>>, labels: Vec<Prediction>) -> Result<Self> {
        if rows.len() != labels.len() {
            return Err(MonitorError::DatasetError(format!(
                "{} rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }

        if let Some(first) = rows.first() {
            let expected = first.len();
            if let Some(bad) = rows.iter().find(|row| row.len() != expected) {
                return Err(MonitorError::FeatureMismatch {
                    expected,
                    actual: bad.len(),
                });
            }
        }

        Ok(Self { rows, labels })
    }

    /// The seven hand-coded training rows
    pub fn sample() -> Result<Self> {
        let temperature = [30.0, 45.0, 25.0, 40.0, 20.0, 35.0, 50.0];
        let humidity = [70.0, 20.0, 90.0, 30.0, 95.0, 50.0, 10.0];
        let wind_speed = [20.0, 60.0, 15.0, 50.0, 10.0, 40.0, 70.0];
        let disaster = ["No", "Yes", "No", "Yes", "No", "Yes", "Yes"];

        let rows = (0..temperature.len())
            .map(|i| vec![temperature[i], humidity[i], wind_speed[i]])
            .collect();
        let labels = disaster
            .iter()
            .map(|label| label.parse::<Prediction>())
            .collect::<Result<Vec<_>>>()?;

        Self::new(rows, labels)
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn labels(&self) -> &[Prediction] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn feature_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// Number of rows held out for a given test fraction
    pub fn test_size(&self, test_fraction: f64) -> usize {
        (self.len() as f64 * test_fraction).ceil() as usize
    }

    /// Shuffle and split into (train, test)
    ///
    /// The test part holds `ceil(len * test_fraction)` rows. The train part
    /// must keep at least one row.
    pub fn train_test_split<R: Rng + ?Sized>(
        &self,
        test_fraction: f64,
        rng: &mut R,
    ) -> Result<(Dataset, Dataset)> {
        if !(0.0..1.0).contains(&test_fraction) {
            return Err(MonitorError::DatasetError(format!(
                "test fraction must be in [0, 1), got {}",
                test_fraction
            )));
        }

        let test_size = self.test_size(test_fraction);
        if test_size >= self.len() {
            return Err(MonitorError::DatasetError(format!(
                "cannot hold out {} of {} rows",
                test_size,
                self.len()
            )));
        }

        let mut indices: Vec<usize> = (0..self.len()).collect();
        indices.shuffle(rng);

        let (test_idx, train_idx) = indices.split_at(test_size);
        Ok((self.subset(train_idx), self.subset(test_idx)))
    }

    fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }
}

/// Fraction of predictions equal to the truth; `None` for empty input
pub fn accuracy_score(truth: &[Prediction], predicted: &[Prediction]) -> Option<f64> {
    if truth.is_empty() || truth.len() != predicted.len() {
        return None;
    }

    let correct = truth
        .iter()
        .zip(predicted)
        .filter(|(t, p)| t == p)
        .count();
    Some(correct as f64 / truth.len() as f64)
}
