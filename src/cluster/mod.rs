//! Clustering of projected document vectors.
//!
//! ## K-means
//!
//! The classic algorithm: assign each point to the nearest centroid, then
//! update centroids to the mean of their points. Repeat until no assignment
//! changes or the iteration cap is reached.
//!
//! **Objective** (over training points only):
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k ∩ train} ||x - μ_k||²
//! ```
//!
//! **Split discipline**: seeds are sampled from training points and centroids
//! average training members only. Test points are still assigned every pass,
//! so every document ends up with a label.
//!
//! **Degenerate cases** are warnings, not errors: a centroid with no training
//! member keeps its position, and when `k` exceeds the number of training
//! points the missing seeds repeat the first training point.
//!
//! ## Usage
//!
//! ```rust
//! use docmap::cluster::{Clustering, Kmeans};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![1.0, 0.0],
//!     vec![10.0, 0.0],
//!     vec![11.0, 0.0],
//!     vec![10.5, 0.2], // held out
//! ];
//! let labels = Kmeans::new(2).with_seed(42).fit_predict(&data, &[0, 1, 2, 3]).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_eq!(labels[2], labels[4]);
//! assert_ne!(labels[0], labels[2]);
//! ```

mod kmeans;
mod traits;

pub use kmeans::{ClusterWarning, Kmeans, KmeansFit, DEFAULT_MAX_ITER};
pub use traits::Clustering;
