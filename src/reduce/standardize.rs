use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util;

/// Minimum training rows for a sample standard deviation.
pub const MIN_TRAIN_ROWS: usize = 2;

/// Per-column centering and scaling fitted on training rows only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    mean: Vec<f64>,
    std_dev: Vec<f64>,
    n_train: usize,
}

impl Standardizer {
    /// Fit column means and sample standard deviations over `train` rows.
    ///
    /// A zero standard deviation is stored as `1.0`, so constant columns
    /// standardize to zero instead of NaN.
    pub fn fit(matrix: &[Vec<f64>], train: &[usize]) -> Result<Self> {
        let d = util::check_matrix(matrix)?;
        util::check_train(train, matrix.len())?;
        if train.len() < MIN_TRAIN_ROWS {
            return Err(Error::InsufficientTrainData {
                required: MIN_TRAIN_ROWS,
                found: train.len(),
            });
        }
        let n_train = train.len();

        let mut mean = vec![0.0; d];
        for &i in train {
            for (m, v) in mean.iter_mut().zip(&matrix[i]) {
                *m += v;
            }
        }
        for m in &mut mean {
            *m /= n_train as f64;
        }
        // Summation rounding can leave a constant column's mean off by an ulp;
        // pin it so the deviation below comes out exactly zero.
        let first = &matrix[train[0]];
        for (j, m) in mean.iter_mut().enumerate() {
            if train.iter().all(|&i| matrix[i][j] == first[j]) {
                *m = first[j];
            }
        }

        let mut std_dev = vec![0.0; d];
        for &i in train {
            for ((s, v), m) in std_dev.iter_mut().zip(&matrix[i]).zip(&mean) {
                let c = v - m;
                *s += c * c;
            }
        }
        for s in &mut std_dev {
            *s = (*s / (n_train - 1) as f64).sqrt();
            if *s == 0.0 {
                *s = 1.0;
            }
        }

        Ok(Self {
            mean,
            std_dev,
            n_train,
        })
    }

    /// Standardize every row of `matrix`, train and test alike.
    pub fn transform(&self, matrix: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        let d = util::check_matrix(matrix)?;
        if d != self.mean.len() {
            return Err(Error::DimensionMismatch {
                expected: self.mean.len(),
                found: d,
            });
        }
        Ok(matrix.iter().map(|row| self.transform_row(row)).collect())
    }

    fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(&self.mean)
            .zip(&self.std_dev)
            .map(|((v, m), s)| (v - m) / s)
            .collect()
    }

    /// Column means.
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Column standard deviations (after the zero floor).
    pub fn std_dev(&self) -> &[f64] {
        &self.std_dev
    }

    /// Number of rows the statistics were fitted on.
    pub fn n_train(&self) -> usize {
        self.n_train
    }
}

/// Sample covariance (divisor `n_train - 1`) of standardized `train` rows.
///
/// Rows are already centered by [`Standardizer`], so no mean is subtracted here.
pub fn covariance(standardized: &[Vec<f64>], train: &[usize]) -> Result<Vec<Vec<f64>>> {
    let d = util::check_matrix(standardized)?;
    util::check_train(train, standardized.len())?;
    if train.len() < MIN_TRAIN_ROWS {
        return Err(Error::InsufficientTrainData {
            required: MIN_TRAIN_ROWS,
            found: train.len(),
        });
    }
    let denom = (train.len() - 1) as f64;

    let mut cov = vec![vec![0.0; d]; d];
    for i in 0..d {
        for j in i..d {
            let sum: f64 = train
                .iter()
                .map(|&r| standardized[r][i] * standardized[r][j])
                .sum();
            let c = sum / denom;
            cov[i][j] = c;
            cov[j][i] = c;
        }
    }
    Ok(cov)
}
