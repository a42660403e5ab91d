use crate::error::{Error, Result};

/// Validate a dense row-major matrix and return its width.
///
/// Rejects empty input, zero-width rows, ragged rows and non-finite entries.
pub(crate) fn check_matrix(data: &[Vec<f64>]) -> Result<usize> {
    let first = data.first().ok_or(Error::EmptyInput)?;
    let d = first.len();
    if d == 0 {
        return Err(Error::InvalidParameter {
            name: "dimension",
            message: "must be at least 1",
        });
    }
    for (row, point) in data.iter().enumerate() {
        if point.len() != d {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: point.len(),
            });
        }
        if let Some(col) = point.iter().position(|v| !v.is_finite()) {
            return Err(Error::NonFiniteValue { row, col });
        }
    }
    Ok(d)
}

/// Check that every index addresses one of `len` rows.
pub(crate) fn check_indices(indices: &[usize], len: usize) -> Result<()> {
    match indices.iter().find(|&&i| i >= len) {
        Some(&index) => Err(Error::IndexOutOfBounds { index, len }),
        None => Ok(()),
    }
}

/// Check that training indices are in range and name each row at most once.
pub(crate) fn check_train(train: &[usize], len: usize) -> Result<()> {
    check_indices(train, len)?;
    let mut seen = vec![false; len];
    for &i in train {
        if std::mem::replace(&mut seen[i], true) {
            return Err(Error::InvalidSplit {
                message: "index appears more than once",
            });
        }
    }
    Ok(())
}

#[inline]
pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[inline]
pub(crate) fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
