//! End-to-end analysis: TF-IDF → PCA → k-means, threaded through one [`Split`].

use rand::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cluster::{ClusterWarning, Kmeans};
use crate::error::{Error, Result};
use crate::reduce::{Jacobi, Pca};
use crate::split::{SetRole, Split};
use crate::text::{TfidfParams, TfidfVectorizer, Vocabulary};

/// Every knob of the analysis. No field has an implicit default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Vocabulary and n-gram options.
    pub tfidf: TfidfParams,
    /// Principal components to keep (1..=feature count).
    pub n_components: usize,
    /// Number of clusters.
    pub k: usize,
    /// Jacobi rotation budget.
    pub eigen_max_iter: usize,
    /// Jacobi off-diagonal tolerance.
    pub eigen_tolerance: f64,
    /// K-means iteration cap.
    pub kmeans_max_iter: usize,
    /// Seed for centroid initialization.
    pub seed: u64,
}

/// Outputs handed to rendering and export.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Analysis {
    /// Column labels of `features`.
    pub vocabulary: Vocabulary,
    /// L2-normalized TF-IDF rows, one per document.
    pub features: Vec<Vec<f64>>,
    /// Rows in principal-component space.
    pub projected: Vec<Vec<f64>>,
    /// Cluster id per document.
    pub labels: Vec<usize>,
    /// Variance share of each kept component.
    pub explained_variance_ratio: Vec<f64>,
    /// Train/test membership used for fitting.
    pub split: Split,
    /// Non-fatal clustering notices.
    pub warnings: Vec<ClusterWarning>,
}

/// One exported document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Row index.
    pub id: usize,
    /// Text before cleaning.
    pub original: String,
    /// Text the vectorizer saw.
    pub cleaned: String,
    /// Train or test.
    pub set: SetRole,
    /// Projected coordinates.
    pub vector: Vec<f64>,
    /// Cluster id.
    pub cluster: usize,
}

/// Run the full chain on cleaned documents.
///
/// Vocabulary filtering sees every document; standardization, covariance and
/// centroids are fitted on `split.train()` only, and every document is
/// projected and labelled.
pub fn analyze<S: AsRef<str>>(
    documents: &[S],
    split: &Split,
    config: &AnalysisConfig,
) -> Result<Analysis> {
    if documents.len() != split.len() {
        return Err(Error::DimensionMismatch {
            expected: split.len(),
            found: documents.len(),
        });
    }

    let tfidf = TfidfVectorizer::new(config.tfidf.clone()).fit_transform(documents)?;

    let pca = Pca::new(
        config.n_components,
        Jacobi::new(config.eigen_max_iter, config.eigen_tolerance),
    )
    .fit_project(&tfidf.matrix, split.train())?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let clusters = Kmeans::new(config.k)
        .with_max_iter(config.kmeans_max_iter)
        .fit_with_rng(&pca.projected, split.train(), &mut rng)?;

    info!(
        documents = documents.len(),
        train = split.train().len(),
        features = tfidf.vocabulary.len(),
        components = config.n_components,
        k = config.k,
        eigen_converged = pca.eigen.converged,
        kmeans_iterations = clusters.iterations,
        "analysis complete"
    );

    Ok(Analysis {
        explained_variance_ratio: pca.projector.explained_variance_ratio(),
        vocabulary: tfidf.vocabulary,
        features: tfidf.matrix,
        projected: pca.projected,
        labels: clusters.labels,
        split: split.clone(),
        warnings: clusters.warnings,
    })
}

impl Analysis {
    /// Pair each document's texts with its results.
    ///
    /// `documents` yields `(original, cleaned)` in row order.
    pub fn records<O, C>(&self, documents: &[(O, C)]) -> Result<Vec<DocumentRecord>>
    where
        O: AsRef<str>,
        C: AsRef<str>,
    {
        if documents.len() != self.labels.len() {
            return Err(Error::DimensionMismatch {
                expected: self.labels.len(),
                found: documents.len(),
            });
        }
        Ok(documents
            .iter()
            .enumerate()
            .map(|(id, (original, cleaned))| DocumentRecord {
                id,
                original: original.as_ref().to_string(),
                cleaned: cleaned.as_ref().to_string(),
                set: self.split.role(id).unwrap_or(SetRole::Test),
                vector: self.projected[id].clone(),
                cluster: self.labels[id],
            })
            .collect())
    }
}
