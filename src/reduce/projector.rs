use serde::{Deserialize, Serialize};

use super::jacobi::EigenDecomposition;
use crate::error::{Error, Result};
use crate::util;

/// Linear map onto the top-k eigenvectors.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Projector {
    /// `k x d`: row `i` is the eigenvector with the i-th largest eigenvalue.
    components: Vec<Vec<f64>>,
    /// All eigenvalues, descending.
    sorted_eigenvalues: Vec<f64>,
}

impl Projector {
    /// Select the `k` eigenvectors with the largest eigenvalues.
    ///
    /// Ties are broken by solver index, so the choice is deterministic.
    pub fn fit(eigen: &EigenDecomposition, k: usize) -> Result<Self> {
        let n_features = eigen.len();
        if k == 0 || k > n_features {
            return Err(Error::InvalidComponentCount {
                requested: k,
                n_features,
            });
        }
        let order = eigen.sorted_indices();
        let components = order[..k]
            .iter()
            .map(|&j| eigen.eigenvectors[j].clone())
            .collect();
        let sorted_eigenvalues = order.iter().map(|&j| eigen.eigenvalues[j]).collect();
        Ok(Self {
            components,
            sorted_eigenvalues,
        })
    }

    /// Fit on `eigen` and project `standardized` in one call.
    pub fn fit_project(
        standardized: &[Vec<f64>],
        eigen: &EigenDecomposition,
        k: usize,
    ) -> Result<Vec<Vec<f64>>> {
        Self::fit(eigen, k)?.project(standardized)
    }

    /// Project every row onto the selected components.
    pub fn project(&self, standardized: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        let d = util::check_matrix(standardized)?;
        if d != self.n_features() {
            return Err(Error::DimensionMismatch {
                expected: self.n_features(),
                found: d,
            });
        }
        Ok(standardized
            .iter()
            .map(|row| self.components.iter().map(|c| util::dot(row, c)).collect())
            .collect())
    }

    /// Number of output dimensions.
    pub fn n_components(&self) -> usize {
        self.components.len()
    }

    /// Input dimensionality.
    pub fn n_features(&self) -> usize {
        self.sorted_eigenvalues.len()
    }

    /// Selected eigenvectors, one per output dimension.
    pub fn components(&self) -> &[Vec<f64>] {
        &self.components
    }

    /// Every eigenvalue, descending.
    pub fn eigenvalues(&self) -> &[f64] {
        &self.sorted_eigenvalues
    }

    /// Share of total variance (trace) carried by each selected component.
    ///
    /// All zeros when the trace is zero (every feature constant on train rows).
    pub fn explained_variance_ratio(&self) -> Vec<f64> {
        let total: f64 = self.sorted_eigenvalues.iter().sum();
        self.sorted_eigenvalues[..self.n_components()]
            .iter()
            .map(|&l| if total > 0.0 { l / total } else { 0.0 })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eigen() -> EigenDecomposition {
        EigenDecomposition {
            eigenvalues: vec![1.0, 3.0, 2.0],
            eigenvectors: vec![
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0],
            ],
            iterations: 0,
            converged: true,
            max_off_diagonal: 0.0,
        }
    }

    #[test]
    fn test_selects_top_components() {
        let p = Projector::fit(&eigen(), 2).unwrap();
        assert_eq!(p.eigenvalues(), &[3.0, 2.0, 1.0]);
        assert_eq!(p.components()[0], vec![0.0, 1.0, 0.0]);
        assert_eq!(p.components()[1], vec![0.0, 0.0, 1.0]);

        let out = p.project(&[vec![5.0, 6.0, 7.0], vec![-1.0, 0.0, 1.0]]).unwrap();
        assert_eq!(out, vec![vec![6.0, 7.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn test_invalid_component_count() {
        for k in [0, 4] {
            assert!(matches!(
                Projector::fit(&eigen(), k),
                Err(Error::InvalidComponentCount { n_features: 3, .. })
            ));
        }
    }

    #[test]
    fn test_explained_variance_ratio() {
        let full = Projector::fit(&eigen(), 3).unwrap();
        let ratio = full.explained_variance_ratio();
        assert!((ratio.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!((ratio[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_project_width_mismatch() {
        let p = Projector::fit(&eigen(), 1).unwrap();
        assert!(p.project(&[vec![1.0, 2.0]]).is_err());
    }
}
