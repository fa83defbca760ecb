//! CART decision tree
//!
//! Binary splits on `feature <= threshold`, chosen by Gini impurity.
//! Thresholds sit halfway between adjacent distinct values.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{MonitorError, Result};
use crate::types::Prediction;

const CLASS_COUNT: usize = 2;

/// How many candidate features to consider at each split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaxFeatures {
    All,
    Sqrt,
    Fixed(usize),
}

impl MaxFeatures {
    /// Number of candidates for `n_features` columns, at least one
    pub fn resolve(&self, n_features: usize) -> usize {
        let k = match self {
            MaxFeatures::All => n_features,
            MaxFeatures::Sqrt => (n_features as f64).sqrt() as usize,
            MaxFeatures::Fixed(k) => *k,
        };
        k.clamp(1, n_features.max(1))
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        counts: [usize; CLASS_COUNT],
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn leaf(counts: [usize; CLASS_COUNT]) -> Self {
        Node::Leaf { counts }
    }
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

/// Single classification tree
#[derive(Debug, Clone)]
pub struct DecisionTree {
    max_depth: Option<usize>,
    min_samples_split: usize,
    max_features: MaxFeatures,
    n_features: usize,
    root: Option<Node>,
}

impl DecisionTree {
    pub fn new(max_depth: Option<usize>, min_samples_split: usize, max_features: MaxFeatures) -> Self {
        Self {
            max_depth,
            min_samples_split: min_samples_split.max(2),
            max_features,
            n_features: 0,
            root: None,
        }
    }

    /// Depth of the fitted tree (a lone leaf has depth 0)
    pub fn depth(&self) -> usize {
        fn walk(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(left).max(walk(right)),
            }
        }
        self.root.as_ref().map(walk).unwrap_or(0)
    }

    /// Fit on the rows selected by `sample` (indices may repeat)
    pub fn fit_sample<R: Rng + ?Sized>(
        &mut self,
        rows: &[Vec<f64>],
        labels: &[Prediction],
        sample: &[usize],
        rng: &mut R,
    ) -> Result<()> {
        if sample.is_empty() {
            return Err(MonitorError::DatasetError("empty training sample".to_string()));
        }
        self.n_features = rows[sample[0]].len();
        let root = self.grow(rows, labels, sample, 0, rng);
        self.root = Some(root);
        Ok(())
    }

    /// Class distribution at the leaf reached by `x`, as disaster probability
    pub fn predict_proba(&self, x: &[f64]) -> Result<f64> {
        let root = self.root.as_ref().ok_or(MonitorError::NotFitted)?;
        if x.len() != self.n_features {
            return Err(MonitorError::FeatureMismatch {
                expected: self.n_features,
                actual: x.len(),
            });
        }

        let mut node = root;
        loop {
            match node {
                Node::Leaf { counts } => {
                    let total = counts.iter().sum::<usize>().max(1);
                    return Ok(counts[Prediction::Disaster.index()] as f64 / total as f64);
                }
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if x[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }

    fn grow<R: Rng + ?Sized>(
        &self,
        rows: &[Vec<f64>],
        labels: &[Prediction],
        sample: &[usize],
        depth: usize,
        rng: &mut R,
    ) -> Node {
        let counts = class_counts(labels, sample);
        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        let depth_reached = self.max_depth.map_or(false, |max| depth >= max);

        if pure || depth_reached || sample.len() < self.min_samples_split {
            return Node::leaf(counts);
        }

        let Some(split) = self.best_split(rows, labels, sample, rng) else {
            return Node::leaf(counts);
        };

        let (left, right): (Vec<usize>, Vec<usize>) = sample
            .iter()
            .partition(|&&i| rows[i][split.feature] <= split.threshold);

        Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left: Box::new(self.grow(rows, labels, &left, depth + 1, rng)),
            right: Box::new(self.grow(rows, labels, &right, depth + 1, rng)),
        }
    }

    /// Best split over a random feature subset, widening to every feature
    /// when the subset is constant on this node
    fn best_split<R: Rng + ?Sized>(
        &self,
        rows: &[Vec<f64>],
        labels: &[Prediction],
        sample: &[usize],
        rng: &mut R,
    ) -> Option<SplitCandidate> {
        if self.n_features == 0 {
            return None;
        }
        let k = self.max_features.resolve(self.n_features);
        let candidates = rand::seq::index::sample(rng, self.n_features, k).into_vec();

        let search = |features: &mut dyn Iterator<Item = usize>| {
            features
                .filter_map(|f| best_split_on_feature(rows, labels, sample, f))
                .min_by(|a, b| a.impurity.total_cmp(&b.impurity))
        };

        search(&mut candidates.iter().copied()).or_else(|| {
            let mut rest = (0..self.n_features).filter(|f| !candidates.contains(f));
            search(&mut rest)
        })
    }
}

fn class_counts(labels: &[Prediction], sample: &[usize]) -> [usize; CLASS_COUNT] {
    let mut counts = [0; CLASS_COUNT];
    for &i in sample {
        counts[labels[i].index()] += 1;
    }
    counts
}

fn gini(counts: &[usize; CLASS_COUNT]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}

/// Lowest weighted Gini split on one feature; `None` if the feature is constant
fn best_split_on_feature(
    rows: &[Vec<f64>],
    labels: &[Prediction],
    sample: &[usize],
    feature: usize,
) -> Option<SplitCandidate> {
    let mut ordered: Vec<(f64, Prediction)> = sample
        .iter()
        .map(|&i| (rows[i][feature], labels[i]))
        .collect();
    ordered.sort_by(|a, b| a.0.total_cmp(&b.0));

    let n = ordered.len();
    if n < 2 {
        return None;
    }
    let mut right = [0usize; CLASS_COUNT];
    for (_, label) in &ordered {
        right[label.index()] += 1;
    }
    let mut left = [0usize; CLASS_COUNT];

    let mut best: Option<SplitCandidate> = None;
    for pos in 0..n - 1 {
        let class = ordered[pos].1.index();
        left[class] += 1;
        right[class] -= 1;

        let (value, next) = (ordered[pos].0, ordered[pos + 1].0);
        if value == next {
            continue;
        }

        let n_left = (pos + 1) as f64;
        let n_right = (n - pos - 1) as f64;
        let impurity = (n_left * gini(&left) + n_right * gini(&right)) / n as f64;

        if best.map_or(true, |b| impurity < b.impurity) {
            best = Some(SplitCandidate {
                feature,
                threshold: (value + next) / 2.0,
                impurity,
            });
        }
    }
    best
}
