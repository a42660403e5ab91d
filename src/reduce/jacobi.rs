//! Cyclic Jacobi eigenvalue algorithm for symmetric matrices.
//!
//! Each step finds the off-diagonal entry of largest magnitude `a_pq` and applies
//! the plane rotation with angle
//!
//! ```text
//! phi = 0.5 * atan2(2 a_pq, a_qq - a_pp)
//! ```
//!
//! which zeroes it. Rotations accumulate into `V` (starting from identity), so at
//! convergence `A ≈ V diag(λ) Vᵀ`. Only rows/columns `p` and `q` change per step,
//! making each rotation O(n).
//!
//! The raw output is an unordered set of pairs; see
//! [`EigenDecomposition::sorted_indices`] before taking a "top k".

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::util;

/// Relative tolerance for the symmetry check on input.
const SYMMETRY_TOL: f64 = 1e-9;

/// Jacobi solver settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Jacobi {
    max_iter: usize,
    tolerance: f64,
}

/// Eigenpairs of a symmetric matrix, in solver order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EigenDecomposition {
    /// Final diagonal entries.
    pub eigenvalues: Vec<f64>,
    /// `eigenvectors[j]` pairs with `eigenvalues[j]` (column `j` of the rotation product).
    pub eigenvectors: Vec<Vec<f64>>,
    /// Rotations applied.
    pub iterations: usize,
    /// Whether the largest off-diagonal magnitude fell below tolerance.
    pub converged: bool,
    /// Largest remaining off-diagonal magnitude.
    pub max_off_diagonal: f64,
}

impl Jacobi {
    /// `max_iter` caps the number of rotations; `tolerance` is the off-diagonal
    /// magnitude treated as zero.
    pub fn new(max_iter: usize, tolerance: f64) -> Self {
        Self {
            max_iter,
            tolerance,
        }
    }

    /// Rotation budget.
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Convergence threshold.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Decompose a square symmetric matrix.
    ///
    /// Hitting the rotation budget is not an error: the approximate pairs are
    /// returned with `converged == false`.
    pub fn decompose(&self, matrix: &[Vec<f64>]) -> Result<EigenDecomposition> {
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(Error::InvalidParameter {
                name: "tolerance",
                message: "must be finite and non-negative",
            });
        }
        let n = util::check_matrix(matrix)?;
        if matrix.len() != n {
            return Err(Error::DimensionMismatch {
                expected: matrix.len(),
                found: n,
            });
        }
        check_symmetric(matrix)?;

        let mut a: Vec<Vec<f64>> = matrix.to_vec();
        let mut v: Vec<Vec<f64>> = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();

        let mut iterations = 0;
        let mut converged = false;
        let (mut p, mut q, mut max_off) = largest_off_diagonal(&a);

        while iterations < self.max_iter {
            if max_off < self.tolerance || max_off == 0.0 {
                converged = true;
                break;
            }
            rotate(&mut a, &mut v, p, q);
            iterations += 1;
            (p, q, max_off) = largest_off_diagonal(&a);
        }
        if !converged && (max_off < self.tolerance || max_off == 0.0) {
            converged = true;
        }

        if converged {
            debug!(n, iterations, max_off, "jacobi converged");
        } else {
            warn!(
                n,
                iterations,
                max_off,
                tolerance = self.tolerance,
                "jacobi hit rotation cap before convergence"
            );
        }

        let eigenvalues = (0..n).map(|i| a[i][i]).collect();
        let eigenvectors = (0..n).map(|j| (0..n).map(|i| v[i][j]).collect()).collect();

        Ok(EigenDecomposition {
            eigenvalues,
            eigenvectors,
            iterations,
            converged,
            max_off_diagonal: max_off,
        })
    }
}

impl EigenDecomposition {
    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    /// True for a 0x0 input (never produced by [`Jacobi::decompose`]).
    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }

    /// Pair indices by descending eigenvalue; ties keep solver order.
    pub fn sorted_indices(&self) -> Vec<usize> {
        let mut idx: Vec<usize> = (0..self.eigenvalues.len()).collect();
        // Stable sort: equal eigenvalues stay in index order.
        idx.sort_by(|&a, &b| self.eigenvalues[b].total_cmp(&self.eigenvalues[a]));
        idx
    }
}

fn check_symmetric(a: &[Vec<f64>]) -> Result<()> {
    let n = a.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (x, y) = (a[i][j], a[j][i]);
            let scale = x.abs().max(y.abs()).max(1.0);
            if (x - y).abs() > SYMMETRY_TOL * scale {
                return Err(Error::NotSymmetric { row: i, col: j });
            }
        }
    }
    Ok(())
}

/// `(p, q, |a_pq|)` for the largest upper-triangle entry; first found wins ties.
fn largest_off_diagonal(a: &[Vec<f64>]) -> (usize, usize, f64) {
    let n = a.len();
    let (mut p, mut q, mut max_val) = (0, 0, 0.0);
    for i in 0..n.saturating_sub(1) {
        for j in (i + 1)..n {
            let v = a[i][j].abs();
            if v > max_val {
                max_val = v;
                p = i;
                q = j;
            }
        }
    }
    (p, q, max_val)
}

fn rotate(a: &mut [Vec<f64>], v: &mut [Vec<f64>], p: usize, q: usize) {
    let n = a.len();
    let app = a[p][p];
    let aqq = a[q][q];
    let apq = a[p][q];

    let phi = 0.5 * (2.0 * apq).atan2(aqq - app);
    let (s, c) = phi.sin_cos();

    a[p][p] = c * c * app - 2.0 * s * c * apq + s * s * aqq;
    a[q][q] = s * s * app + 2.0 * s * c * apq + c * c * aqq;
    a[p][q] = 0.0;
    a[q][p] = 0.0;

    for i in 0..n {
        if i == p || i == q {
            continue;
        }
        let aip = a[i][p];
        let aiq = a[i][q];
        a[i][p] = c * aip - s * aiq;
        a[p][i] = a[i][p];
        a[i][q] = s * aip + c * aiq;
        a[q][i] = a[i][q];
    }

    for row in v.iter_mut() {
        let vip = row[p];
        let viq = row[q];
        row[p] = c * vip - s * viq;
        row[q] = s * vip + c * viq;
    }
}
