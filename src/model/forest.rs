//! Random forest classifier
//!
//! Bagged CART trees with per-split feature subsampling. Predictions
//! average the trees' leaf distributions; a tie resolves to no-disaster.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::tree::{DecisionTree, MaxFeatures};
use super::Classifier;
use crate::errors::{MonitorError, Result};
use crate::types::Prediction;

/// Forest hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// Draw each tree's sample with replacement
    pub bootstrap: bool,
    pub max_features: MaxFeatures,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            bootstrap: true,
            max_features: MaxFeatures::Sqrt,
        }
    }
}

/// Seeded random forest
#[derive(Debug, Clone)]
pub struct RandomForest {
    config: ForestConfig,
    seed: u64,
    n_features: Option<usize>,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(config: ForestConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            n_features: None,
            trees: Vec::new(),
        }
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Fit, calling `on_tree` after each tree is grown
    pub fn fit_with_progress<F>(
        &mut self,
        features: &[Vec<f64>],
        labels: &[Prediction],
        mut on_tree: F,
    ) -> Result<()>
    where
        F: FnMut(usize),
    {
        if features.is_empty() {
            return Err(MonitorError::DatasetError("no training rows".to_string()));
        }
        if features.len() != labels.len() {
            return Err(MonitorError::DatasetError(format!(
                "{} rows but {} labels",
                features.len(),
                labels.len()
            )));
        }
        if self.config.n_trees == 0 {
            return Err(MonitorError::ConfigError("forest needs at least one tree".to_string()));
        }

        let width = features[0].len();
        if let Some(bad) = features.iter().find(|row| row.len() != width) {
            return Err(MonitorError::FeatureMismatch {
                expected: width,
                actual: bad.len(),
            });
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let n = features.len();
        let mut trees = Vec::with_capacity(self.config.n_trees);

        for i in 0..self.config.n_trees {
            let sample: Vec<usize> = if self.config.bootstrap {
                (0..n).map(|_| rng.gen_range(0..n)).collect()
            } else {
                (0..n).collect()
            };

            let mut tree_rng = StdRng::seed_from_u64(rng.gen());
            let mut tree = DecisionTree::new(
                self.config.max_depth,
                self.config.min_samples_split,
                self.config.max_features,
            );
            tree.fit_sample(features, labels, &sample, &mut tree_rng)?;
            trees.push(tree);
            on_tree(i + 1);
        }

        self.trees = trees;
        self.n_features = Some(width);
        tracing::trace!(trees = self.trees.len(), rows = n, "forest fitted");
        Ok(())
    }

    /// Mean disaster probability across trees
    pub fn predict_proba(&self, features: &[f64]) -> Result<f64> {
        let width = self.n_features.ok_or(MonitorError::NotFitted)?;
        if features.len() != width {
            return Err(MonitorError::FeatureMismatch {
                expected: width,
                actual: features.len(),
            });
        }

        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.predict_proba(features)?;
        }
        Ok(total / self.trees.len() as f64)
    }
}

impl Classifier for RandomForest {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[Prediction]) -> Result<()> {
        self.fit_with_progress(features, labels, |_| {})
    }

    fn predict(&self, features: &[f64]) -> Result<Prediction> {
        let proba = self.predict_proba(features)?;
        Ok(if proba > 0.5 {
            Prediction::Disaster
        } else {
            Prediction::NoDisaster
        })
    }
}
