//! Bagged ensemble of CART regression trees.
//!
//! Each tree is grown on a bootstrap sample, splitting on whichever
//! feature/threshold pair minimises the summed squared error of the two
//! children. Predictions are the mean of the per-tree leaf values.

use crate::domain::ports::PriceModel;
use crate::utils::error::{PricerError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub seed: Option<u64>,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone)]
struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    fn grow(x: &[Vec<f64>], y: &[f64], rows: Vec<usize>, params: &ForestParams) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.build(x, y, rows, 0, params);
        tree
    }

    /// Appends the subtree for `rows` and returns its root index.
    fn build(
        &mut self,
        x: &[Vec<f64>],
        y: &[f64],
        rows: Vec<usize>,
        depth: usize,
        params: &ForestParams,
    ) -> usize {
        let mean = rows.iter().map(|&r| y[r]).sum::<f64>() / rows.len() as f64;
        let index = self.nodes.len();
        self.nodes.push(Node::Leaf { value: mean });

        let depth_reached = params.max_depth.is_some_and(|max| depth >= max);
        if depth_reached || rows.len() < params.min_samples_split {
            return index;
        }

        let Some((feature, threshold)) = best_split(x, y, &rows) else {
            return index;
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) =
            rows.into_iter().partition(|&r| x[r][feature] <= threshold);

        let left = self.build(x, y, left_rows, depth + 1, params);
        let right = self.build(x, y, right_rows, depth + 1, params);
        self.nodes[index] = Node::Split {
            feature,
            threshold,
            left,
            right,
        };
        index
    }

    fn predict(&self, features: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    fn depth(&self) -> usize {
        fn walk(nodes: &[Node], index: usize) -> usize {
            match &nodes[index] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => {
                    1 + walk(nodes, *left).max(walk(nodes, *right))
                }
            }
        }
        walk(&self.nodes, 0)
    }
}

/// Finds the split with the lowest child squared error, or `None` when the
/// node is pure or every feature is constant over `rows`.
fn best_split(x: &[Vec<f64>], y: &[f64], rows: &[usize]) -> Option<(usize, f64)> {
    let parent_sse = sse(rows.iter().map(|&r| y[r]));
    if parent_sse <= f64::EPSILON {
        return None;
    }

    let width = x[rows[0]].len();
    let mut best: Option<(usize, f64, f64)> = None;

    for feature in 0..width {
        let mut sorted: Vec<(f64, f64)> = rows.iter().map(|&r| (x[r][feature], y[r])).collect();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let total_sum: f64 = sorted.iter().map(|(_, t)| t).sum();
        let total_sq: f64 = sorted.iter().map(|(_, t)| t * t).sum();
        let n = sorted.len() as f64;

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for i in 0..sorted.len() - 1 {
            let (value, target) = sorted[i];
            left_sum += target;
            left_sq += target * target;

            let next = sorted[i + 1].0;
            if next <= value {
                continue;
            }

            let left_n = (i + 1) as f64;
            let right_n = n - left_n;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let score = (left_sq - left_sum * left_sum / left_n)
                + (right_sq - right_sum * right_sum / right_n);

            if best.map_or(true, |(_, _, s)| score < s) {
                let midpoint = value + (next - value) / 2.0;
                let threshold = if midpoint < next { midpoint } else { value };
                best = Some((feature, threshold, score));
            }
        }
    }

    best.map(|(feature, threshold, _)| (feature, threshold))
}

fn sse(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let (n, sum) = values.clone().fold((0.0, 0.0), |(n, s), v| (n + 1.0, s + v));
    if n == 0.0 {
        return 0.0;
    }
    let mean = sum / n;
    values.map(|v| (v - mean).powi(2)).sum()
}

#[derive(Debug, Clone)]
pub struct RandomForestRegressor {
    trees: Vec<RegressionTree>,
    n_features: usize,
    n_samples: usize,
    seed: u64,
}

impl RandomForestRegressor {
    pub fn fit(x: &[Vec<f64>], y: &[f64], params: ForestParams) -> Result<Self> {
        if x.is_empty() {
            return Err(model_error("training set is empty"));
        }
        if x.len() != y.len() {
            return Err(model_error(format!(
                "feature rows ({}) and targets ({}) differ in length",
                x.len(),
                y.len()
            )));
        }
        let n_features = x[0].len();
        if n_features == 0 || x.iter().any(|row| row.len() != n_features) {
            return Err(model_error("feature rows must share a non-zero width"));
        }
        if params.n_estimators == 0 {
            return Err(model_error("n_estimators must be at least 1"));
        }

        let seed = params.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);
        let n_samples = x.len();

        let trees: Vec<RegressionTree> = (0..params.n_estimators)
            .map(|_| {
                let rows = (0..n_samples)
                    .map(|_| rng.random_range(0..n_samples))
                    .collect();
                RegressionTree::grow(x, y, rows, &params)
            })
            .collect();

        tracing::info!(
            "Fitted random forest: {} trees, {} samples, {} features, max depth {}, seed {}",
            trees.len(),
            n_samples,
            n_features,
            trees.iter().map(RegressionTree::depth).max().unwrap_or(0),
            seed
        );

        Ok(Self {
            trees,
            n_features,
            n_samples,
            seed,
        })
    }

    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl PriceModel for RandomForestRegressor {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.n_features {
            return Err(model_error(format!(
                "expected {} features, got {}",
                self.n_features,
                features.len()
            )));
        }
        let total: f64 = self.trees.iter().map(|tree| tree.predict(features)).sum();
        Ok(total / self.trees.len() as f64)
    }
}

fn model_error(message: impl Into<String>) -> PricerError {
    PricerError::ModelError {
        message: message.into(),
    }
}
