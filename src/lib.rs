//! Text corpus mapping primitives.
//!
//! `docmap` turns cleaned documents into a low-dimensional clustering:
//! - [`text`]: TF-IDF over word n-grams with document-frequency filtering
//! - [`reduce`]: PCA via train-only standardization and a Jacobi eigensolver
//! - [`cluster`]: k-means with train-only centroid updates
//! - [`split`]: the train/test partition every fitted statistic respects
//! - [`pipeline`]: the three stages chained on one split
//!
//! ```rust
//! use docmap::{analyze, AnalysisConfig, Split, TfidfParams};
//!
//! let docs = ["red apple pie", "green apple tart", "fast red car", "fast green car"];
//! let config = AnalysisConfig {
//!     tfidf: TfidfParams::new(1, 1.0, 1, 1),
//!     n_components: 2,
//!     k: 2,
//!     eigen_max_iter: 200,
//!     eigen_tolerance: 1e-10,
//!     kmeans_max_iter: 100,
//!     seed: 7,
//! };
//! let analysis = analyze(&docs, &Split::all(docs.len()).unwrap(), &config).unwrap();
//! assert_eq!(analysis.labels.len(), 4);
//! assert_eq!(analysis.projected[0].len(), 2);
//! ```

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod pipeline;
pub mod reduce;
pub mod split;
pub mod text;

mod util;

pub use cluster::{ClusterWarning, Clustering, Kmeans, KmeansFit};
pub use error::{Error, Result};
pub use pipeline::{analyze, Analysis, AnalysisConfig, DocumentRecord};
pub use reduce::{covariance, EigenDecomposition, Jacobi, Pca, PcaFit, Projector, Standardizer};
pub use split::{SetRole, Split};
pub use text::{TfidfFit, TfidfParams, TfidfVectorizer, Vocabulary};
