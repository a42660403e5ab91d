//! Lloyd's k-means with train-only centroid updates.
//!
//! Every point (train and test) is assigned to its nearest centroid on each
//! pass, but centroids are averaged over training points alone, so held-out
//! rows receive labels without bending the cluster geometry.

use rand::prelude::*;
use rand::seq::index;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::traits::Clustering;
use crate::error::{Error, Result};
use crate::util;

/// Default iteration cap.
pub const DEFAULT_MAX_ITER: usize = 100;

/// K-means clusterer.
#[derive(Clone, Debug)]
pub struct Kmeans {
    k: usize,
    max_iter: usize,
    seed: Option<u64>,
}

/// Non-fatal conditions observed while clustering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClusterWarning {
    /// A centroid received no training point in an update and kept its position.
    DegenerateCluster {
        /// Cluster id.
        cluster: usize,
        /// Zero-based iteration of the update.
        iteration: usize,
    },
    /// Fewer training points than clusters; remaining seeds repeat the first training point.
    DuplicateSeeds {
        /// Requested cluster count.
        requested: usize,
        /// Distinct training points available.
        available: usize,
    },
}

/// Result of a k-means fit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KmeansFit {
    /// Final centroid positions.
    pub centroids: Vec<Vec<f64>>,
    /// Cluster id for every input point.
    pub labels: Vec<usize>,
    /// Assignment passes run.
    pub iterations: usize,
    /// Whether the last pass changed no assignment.
    pub converged: bool,
    /// Within-cluster squared distance over training points, after the final assignment.
    pub inertia: f64,
    /// Training inertia after each update step.
    pub inertia_history: Vec<f64>,
    /// Degenerate-cluster and seeding notices.
    pub warnings: Vec<ClusterWarning>,
}

impl Kmeans {
    /// Create a k-means clusterer with `k` clusters.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: DEFAULT_MAX_ITER,
            seed: None,
        }
    }

    /// Set the maximum number of assignment passes.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Seed the initialization RNG for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fit using the configured seed (OS entropy when unset).
    pub fn fit(&self, data: &[Vec<f64>], train: &[usize]) -> Result<KmeansFit> {
        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };
        self.fit_with_rng(data, train, &mut rng)
    }

    /// Fit drawing initial centroids from `rng`.
    pub fn fit_with_rng<R: Rng + ?Sized>(
        &self,
        data: &[Vec<f64>],
        train: &[usize],
        rng: &mut R,
    ) -> Result<KmeansFit> {
        self.validate(data, train)?;
        let mut warnings = Vec::new();
        let centroids = init_centroids(data, train, self.k, rng, &mut warnings);
        Ok(self.lloyd(data, train, centroids, warnings))
    }

    /// Alternate assignment and train-only update passes from the given seeds.
    fn lloyd(
        &self,
        data: &[Vec<f64>],
        train: &[usize],
        mut centroids: Vec<Vec<f64>>,
        mut warnings: Vec<ClusterWarning>,
    ) -> KmeansFit {
        // usize::MAX = not yet assigned, so the first pass always counts as a change.
        let mut labels = vec![usize::MAX; data.len()];
        let mut inertia_history = Vec::new();
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iter {
            let mut changed = false;
            for (label, point) in labels.iter_mut().zip(data) {
                let nearest = nearest_centroid(point, &centroids);
                if *label != nearest {
                    *label = nearest;
                    changed = true;
                }
            }
            iterations += 1;

            if !changed {
                converged = true;
                break;
            }

            update_centroids(
                data,
                train,
                &labels,
                &mut centroids,
                iterations - 1,
                &mut warnings,
            );
            inertia_history.push(train_inertia(data, train, &labels, &centroids));
        }

        if converged {
            debug!(k = self.k, iterations, "k-means converged");
        } else {
            debug!(k = self.k, iterations, "k-means stopped at iteration cap");
        }

        let inertia = train_inertia(data, train, &labels, &centroids);
        KmeansFit {
            centroids,
            labels,
            iterations,
            converged,
            inertia,
            inertia_history,
            warnings,
        }
    }

    fn validate(&self, data: &[Vec<f64>], train: &[usize]) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1",
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        util::check_matrix(data)?;
        util::check_train(train, data.len())?;
        if train.is_empty() {
            return Err(Error::InsufficientTrainData {
                required: 1,
                found: 0,
            });
        }
        Ok(())
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f64>], train: &[usize]) -> Result<Vec<usize>> {
        Ok(self.fit(data, train)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// Uniform sample of `k` distinct training points, padded with the first training point.
fn init_centroids<R: Rng + ?Sized>(
    data: &[Vec<f64>],
    train: &[usize],
    k: usize,
    rng: &mut R,
    warnings: &mut Vec<ClusterWarning>,
) -> Vec<Vec<f64>> {
    let available = train.len().min(k);
    let mut centroids: Vec<Vec<f64>> = index::sample(rng, train.len(), available)
        .into_iter()
        .map(|i| data[train[i]].clone())
        .collect();

    if centroids.len() < k {
        warn!(
            requested = k,
            available = train.len(),
            "fewer training points than clusters; repeating first training point"
        );
        warnings.push(ClusterWarning::DuplicateSeeds {
            requested: k,
            available: train.len(),
        });
        let first = &data[train[0]];
        centroids.resize(k, first.clone());
    }
    centroids
}

/// Lowest-index centroid at minimum Euclidean distance.
fn nearest_centroid(point: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (j, c) in centroids.iter().enumerate() {
        let d = util::squared_euclidean(point, c);
        if d < best_dist {
            best_dist = d;
            best = j;
        }
    }
    best
}

fn update_centroids(
    data: &[Vec<f64>],
    train: &[usize],
    labels: &[usize],
    centroids: &mut [Vec<f64>],
    iteration: usize,
    warnings: &mut Vec<ClusterWarning>,
) {
    let dim = data[0].len();
    let mut sums = vec![vec![0.0; dim]; centroids.len()];
    let mut counts = vec![0usize; centroids.len()];

    for &i in train {
        let c = labels[i];
        for (s, v) in sums[c].iter_mut().zip(&data[i]) {
            *s += v;
        }
        counts[c] += 1;
    }

    for (cluster, ((centroid, sum), &count)) in centroids
        .iter_mut()
        .zip(sums)
        .zip(&counts)
        .enumerate()
    {
        if count == 0 {
            warn!(cluster, iteration, "centroid has no training points; keeping position");
            warnings.push(ClusterWarning::DegenerateCluster { cluster, iteration });
            continue;
        }
        for (c, s) in centroid.iter_mut().zip(sum) {
            *c = s / count as f64;
        }
    }
}

fn train_inertia(
    data: &[Vec<f64>],
    train: &[usize],
    labels: &[usize],
    centroids: &[Vec<f64>],
) -> f64 {
    train
        .iter()
        .map(|&i| util::squared_euclidean(&data[i], &centroids[labels[i]]))
        .sum()
}
