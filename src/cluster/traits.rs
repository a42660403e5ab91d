use crate::error::Result;

/// Hard clustering where only `train` rows shape the model but every row gets a label.
pub trait Clustering {
    /// Fit on rows at `train` and return one cluster label per input point.
    fn fit_predict(&self, data: &[Vec<f64>], train: &[usize]) -> Result<Vec<usize>>;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;
}
