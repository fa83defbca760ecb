//! Disaster classifier
//!
//! The monitor loop only depends on the [`Classifier`] trait. The shipped
//! implementation is a seeded random forest of CART trees.

pub mod dataset;
pub mod tree;
pub mod forest;

pub use dataset::{accuracy_score, Dataset};
pub use forest::{ForestConfig, RandomForest};
pub use tree::{DecisionTree, MaxFeatures};

use crate::errors::Result;
use crate::types::Prediction;

/// Supervised model mapping a feature vector to a disaster label
pub trait Classifier {
    /// Train on `features` (one row per sample) and matching `labels`
    fn fit(&mut self, features: &[Vec<f64>], labels: &[Prediction]) -> Result<()>;

    /// Classify one feature vector
    fn predict(&self, features: &[f64]) -> Result<Prediction>;

    /// Classify many rows
    fn predict_many(&self, rows: &[Vec<f64>]) -> Result<Vec<Prediction>> {
        rows.iter().map(|row| self.predict(row)).collect()
    }
}

/// Outcome of the training step
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub train_rows: usize,
    pub test_rows: usize,
    /// `None` when nothing was held out
    pub accuracy: Option<f64>,
}

/// Accuracy of a fitted model on `test`; `None` when `test` is empty
pub fn evaluate<C: Classifier + ?Sized>(model: &C, test: &Dataset) -> Result<Option<f64>> {
    if test.is_empty() {
        return Ok(None);
    }
    let predicted = model.predict_many(test.rows())?;
    Ok(accuracy_score(test.labels(), &predicted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_empty_holdout() {
        let data = Dataset::sample().unwrap();
        let mut forest = RandomForest::new(ForestConfig::default(), 1);
        forest.fit(data.rows(), data.labels()).unwrap();

        let empty = Dataset::new(Vec::new(), Vec::new()).unwrap();
        assert_eq!(evaluate(&forest, &empty).unwrap(), None);
        let accuracy = evaluate(&forest, &data).unwrap().unwrap();
        assert!((0.0..=1.0).contains(&accuracy));
    }
}
