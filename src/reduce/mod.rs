//! Dimensionality reduction (PCA) with train-only statistics.
//!
//! ## Pipeline
//!
//! 1. [`Standardizer`]: center and scale each column with mean and sample
//!    standard deviation of the training rows. A zero deviation is floored to 1.
//! 2. [`covariance`]: sample covariance of the standardized training rows.
//! 3. [`Jacobi`]: eigen-decomposition of that covariance by plane rotations.
//! 4. [`Projector`]: sort pairs by descending eigenvalue and project every row
//!    (train and test) onto the first `k` eigenvectors.
//!
//! Test rows are transformed and projected but never contribute to a fitted
//! statistic.
//!
//! ```rust
//! use docmap::reduce::{Jacobi, Pca};
//!
//! let data = vec![
//!     vec![1.0, 2.0, 0.0],
//!     vec![2.0, 4.1, 1.0],
//!     vec![3.0, 6.2, 0.0],
//!     vec![4.0, 7.9, 1.0],
//! ];
//! let fit = Pca::new(2, Jacobi::new(100, 1e-10)).fit_project(&data, &[0, 1, 2]).unwrap();
//! assert_eq!(fit.projected.len(), 4);
//! assert_eq!(fit.projected[0].len(), 2);
//! ```

mod jacobi;
mod projector;
mod standardize;

pub use jacobi::{EigenDecomposition, Jacobi};
pub use projector::Projector;
pub use standardize::{covariance, Standardizer, MIN_TRAIN_ROWS};

use tracing::debug;

use crate::error::Result;

/// Standardize → covariance → Jacobi → project.
#[derive(Clone, Debug)]
pub struct Pca {
    n_components: usize,
    solver: Jacobi,
}

/// Output of [`Pca::fit_project`].
#[derive(Clone, Debug)]
pub struct PcaFit {
    /// Train-fitted column statistics.
    pub standardizer: Standardizer,
    /// Raw solver output on the training covariance.
    pub eigen: EigenDecomposition,
    /// Top-k projection.
    pub projector: Projector,
    /// Every input row in the reduced space.
    pub projected: Vec<Vec<f64>>,
}

impl Pca {
    /// Keep `n_components` axes, decomposing with `solver`.
    pub fn new(n_components: usize, solver: Jacobi) -> Self {
        Self {
            n_components,
            solver,
        }
    }

    /// Fit on `train` rows of `matrix` and project all rows.
    pub fn fit_project(&self, matrix: &[Vec<f64>], train: &[usize]) -> Result<PcaFit> {
        let standardizer = Standardizer::fit(matrix, train)?;
        let standardized = standardizer.transform(matrix)?;
        let cov = covariance(&standardized, train)?;
        let eigen = self.solver.decompose(&cov)?;
        let projector = Projector::fit(&eigen, self.n_components)?;
        let projected = projector.project(&standardized)?;

        debug!(
            rows = matrix.len(),
            train = train.len(),
            features = standardizer.mean().len(),
            components = self.n_components,
            "pca projection fitted"
        );

        Ok(PcaFit {
            standardizer,
            eigen,
            projector,
            projected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn data() -> Vec<Vec<f64>> {
        vec![
            vec![2.5, 2.4, 0.5],
            vec![0.5, 0.7, 0.1],
            vec![2.2, 2.9, 0.4],
            vec![1.9, 2.2, 0.9],
            vec![3.1, 3.0, 0.2],
            vec![2.3, 2.7, 0.8],
        ]
    }

    #[test]
    fn test_output_shape() {
        let fit = Pca::new(2, Jacobi::new(100, 1e-10))
            .fit_project(&data(), &[0, 1, 2, 3])
            .unwrap();
        assert_eq!(fit.projected.len(), 6);
        assert!(fit.projected.iter().all(|r| r.len() == 2));
    }

    #[test]
    fn test_train_rows_centered_in_projection() {
        let train = [0, 1, 2, 3, 4];
        let fit = Pca::new(3, Jacobi::new(200, 1e-12))
            .fit_project(&data(), &train)
            .unwrap();
        for c in 0..3 {
            let mean: f64 = train.iter().map(|&i| fit.projected[i][c]).sum::<f64>() / 5.0;
            assert!(mean.abs() < 1e-9);
        }
        // Variance of each projected axis over train rows equals its eigenvalue.
        for c in 0..3 {
            let var: f64 = train
                .iter()
                .map(|&i| fit.projected[i][c].powi(2))
                .sum::<f64>()
                / 4.0;
            assert!((var - fit.projector.eigenvalues()[c]).abs() < 1e-8);
        }
    }

    #[test]
    fn test_test_rows_do_not_move_fit() {
        let mut altered = data();
        altered[5] = vec![100.0, -50.0, 7.0];
        let pca = Pca::new(2, Jacobi::new(100, 1e-10));
        let a = pca.fit_project(&data(), &[0, 1, 2, 3, 4]).unwrap();
        let b = pca.fit_project(&altered, &[0, 1, 2, 3, 4]).unwrap();
        for i in 0..5 {
            assert_eq!(a.projected[i], b.projected[i]);
        }
        assert_ne!(a.projected[5], b.projected[5]);
    }

    #[test]
    fn test_too_many_components() {
        let err = Pca::new(4, Jacobi::new(100, 1e-10))
            .fit_project(&data(), &[0, 1, 2])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidComponentCount {
                requested: 4,
                n_features: 3
            }
        ));
    }
}
