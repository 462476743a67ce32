//! Random forest classifier.
//!
//! An ensemble of CART trees grown on bootstrap samples with Gini impurity. Probabilities are the
//! mean of the leaf class distributions reached in every tree.

use crate::config::TrainingParams;
use crate::{PredictorError, PredictorResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Node {
    Leaf {
        distribution: Vec<f64>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A single CART tree stored as a flat arena; node 0 is the root.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

struct TreeBuilder<'a> {
    x: &'a [Vec<f64>],
    y: &'a [usize],
    n_classes: usize,
    n_features: usize,
    max_features: usize,
    max_depth: Option<usize>,
    min_samples_split: usize,
    nodes: Vec<Node>,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

fn gini(counts: &[usize], total: usize) -> f64 {
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

impl<'a> TreeBuilder<'a> {
    fn class_counts(&self, samples: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &s in samples {
            counts[self.y[s]] += 1;
        }
        counts
    }

    fn leaf(&mut self, counts: &[usize], total: usize) -> usize {
        let distribution = counts
            .iter()
            .map(|&c| c as f64 / total as f64)
            .collect();
        self.nodes.push(Node::Leaf { distribution });
        self.nodes.len() - 1
    }

    /// Grows the subtree for `samples` and returns its node index.
    fn grow(&mut self, samples: &mut [usize], depth: usize, rng: &mut StdRng) -> usize {
        let counts = self.class_counts(samples);
        let total = samples.len();
        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        let depth_reached = self.max_depth.is_some_and(|max| depth >= max);

        if pure || depth_reached || total < self.min_samples_split {
            return self.leaf(&counts, total);
        }

        let Some(best) = self.best_split(samples, &counts, rng) else {
            return self.leaf(&counts, total);
        };

        let x = self.x;
        let mut boundary = 0;
        for i in 0..samples.len() {
            if x[samples[i]][best.feature] <= best.threshold {
                samples.swap(i, boundary);
                boundary += 1;
            }
        }

        // Reserve the split slot so the children land after it.
        let index = self.nodes.len();
        self.nodes.push(Node::Leaf {
            distribution: Vec::new(),
        });

        let (left_samples, right_samples) = samples.split_at_mut(boundary);
        let left = self.grow(left_samples, depth + 1, rng);
        let right = self.grow(right_samples, depth + 1, rng);

        self.nodes[index] = Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        index
    }

    fn best_split(
        &self,
        samples: &[usize],
        parent_counts: &[usize],
        rng: &mut StdRng,
    ) -> Option<BestSplit> {
        let mut features: Vec<usize> = (0..self.n_features).collect();
        features.shuffle(rng);

        let mut best: Option<BestSplit> = None;
        let mut visited = 0;
        let mut order: Vec<usize> = samples.to_vec();

        for feature in features {
            // Keep looking past max_features only while nothing splittable was found.
            if visited >= self.max_features && best.is_some() {
                break;
            }
            visited += 1;

            let x = self.x;
            order.sort_by(|&a, &b| x[a][feature].total_cmp(&x[b][feature]));

            let total = order.len();
            let mut left_counts = vec![0usize; self.n_classes];
            let mut right_counts = parent_counts.to_vec();

            for i in 0..total - 1 {
                let class = self.y[order[i]];
                left_counts[class] += 1;
                right_counts[class] -= 1;

                let current = x[order[i]][feature];
                let next = x[order[i + 1]][feature];
                if current == next {
                    continue;
                }

                let n_left = i + 1;
                let n_right = total - n_left;
                let impurity = (n_left as f64 * gini(&left_counts, n_left)
                    + n_right as f64 * gini(&right_counts, n_right))
                    / total as f64;

                if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                    best = Some(BestSplit {
                        feature,
                        threshold: current + (next - current) / 2.0,
                        impurity,
                    });
                }
            }
        }

        best
    }
}

impl DecisionTree {
    fn fit(
        x: &[Vec<f64>],
        y: &[usize],
        samples: &mut [usize],
        n_classes: usize,
        params: &TrainingParams,
        rng: &mut StdRng,
    ) -> Self {
        let n_features = x.first().map_or(0, Vec::len);
        let max_features = ((n_features as f64).sqrt().floor() as usize).max(1);
        let mut builder = TreeBuilder {
            x,
            y,
            n_classes,
            n_features,
            max_features,
            max_depth: params.max_depth,
            min_samples_split: params.min_samples_split,
            nodes: Vec::new(),
        };
        builder.grow(samples, 0, rng);
        Self {
            nodes: builder.nodes,
        }
    }

    fn leaf_distribution(&self, row: &[f64]) -> PredictorResult<&[f64]> {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(Node::Leaf { distribution }) => return Ok(distribution),
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = row.get(*feature).ok_or_else(|| {
                        PredictorError::ArtifactMismatch(format!(
                            "tree splits on feature {feature} beyond the vector"
                        ))
                    })?;
                    index = if *value <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(PredictorError::ArtifactMismatch(format!(
                        "tree references missing node {index}"
                    )))
                }
            }
        }
    }

    fn validate(&self, n_features: usize, n_classes: usize) -> PredictorResult<()> {
        if self.nodes.is_empty() {
            return Err(PredictorError::ArtifactMismatch("tree has no nodes".into()));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Leaf { distribution } if distribution.len() != n_classes => {
                    return Err(PredictorError::ArtifactMismatch(format!(
                        "leaf has {} classes, forest has {n_classes}",
                        distribution.len()
                    )));
                }
                Node::Leaf { distribution } => {
                    let in_range = distribution
                        .iter()
                        .all(|p| p.is_finite() && (0.0..=1.0).contains(p));
                    let total: f64 = distribution.iter().sum();
                    if !in_range || (total - 1.0).abs() > 1e-6 {
                        return Err(PredictorError::ArtifactMismatch(format!(
                            "leaf at node {index} is not a probability distribution"
                        )));
                    }
                }
                Node::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    // Children always follow their parent, which rules out cycles.
                    if *feature >= n_features
                        || *left <= index
                        || *right <= index
                        || *left >= self.nodes.len()
                        || *right >= self.nodes.len()
                    {
                        return Err(PredictorError::ArtifactMismatch(format!(
                            "malformed split at node {index}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Bagged ensemble of decision trees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    n_features: usize,
    n_classes: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fits a forest on `x` (rows of feature values) and `y` (encoded class per row).
    ///
    /// Tree `i` draws its bootstrap sample and feature order from an RNG seeded with
    /// `params.seed + i`, so identical inputs give an identical forest.
    pub fn fit(
        x: &[Vec<f64>],
        y: &[usize],
        n_classes: usize,
        params: &TrainingParams,
    ) -> PredictorResult<Self> {
        params.validate()?;
        if x.is_empty() {
            return Err(PredictorError::InsufficientData {
                needed: 1,
                found: 0,
            });
        }
        if x.len() != y.len() {
            return Err(PredictorError::InvalidInput(format!(
                "{} rows but {} targets",
                x.len(),
                y.len()
            )));
        }
        let n_features = x[0].len();
        if n_features == 0 {
            return Err(PredictorError::NoFeatureColumns);
        }
        if let Some(row) = x.iter().find(|row| row.len() != n_features) {
            return Err(PredictorError::FeatureLength {
                expected: n_features,
                found: row.len(),
            });
        }
        if let Some(&class) = y.iter().find(|&&c| c >= n_classes) {
            return Err(PredictorError::UnknownClass(class));
        }

        let n = x.len();
        let trees = (0..params.n_estimators)
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(params.seed.wrapping_add(i as u64));
                let mut samples: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                DecisionTree::fit(x, y, &mut samples, n_classes, params, &mut rng)
            })
            .collect();

        tracing::debug!(
            "fitted {} trees over {} rows and {} features",
            params.n_estimators,
            n,
            n_features
        );

        Ok(Self {
            n_features,
            n_classes,
            trees,
        })
    }

    /// Mean class distribution over all trees; one entry per class, summing to 1.
    pub fn predict_proba(&self, row: &[f64]) -> PredictorResult<Vec<f64>> {
        if row.len() != self.n_features {
            return Err(PredictorError::FeatureLength {
                expected: self.n_features,
                found: row.len(),
            });
        }
        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (acc, p) in proba.iter_mut().zip(tree.leaf_distribution(row)?) {
                *acc += p;
            }
        }
        let n_trees = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);
        Ok(proba)
    }

    /// Most probable class; the lowest index wins ties.
    pub fn predict(&self, row: &[f64]) -> PredictorResult<usize> {
        let proba = self.predict_proba(row)?;
        let mut best = 0;
        for (i, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = i;
            }
        }
        Ok(best)
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Structural checks for a forest read back from disk.
    pub(crate) fn validate(&self) -> PredictorResult<()> {
        if self.trees.is_empty() {
            return Err(PredictorError::ArtifactMismatch("forest has no trees".into()));
        }
        for tree in &self.trees {
            tree.validate(self.n_features, self.n_classes)?;
        }
        Ok(())
    }
}
