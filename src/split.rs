//! Train/test partition of document indices.
//!
//! Fitted statistics (standardization, covariance, centroids) only read rows in
//! [`Split::train`]; rows in [`Split::test`] are transformed and labelled with
//! those statistics.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util;

/// Which side of the split a document is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetRole {
    /// Used to fit statistics.
    Train,
    /// Only scored against fitted statistics.
    Test,
}

/// Disjoint, exhaustive partition of `0..n` with a non-empty train side.
///
/// Deserialization goes through [`Split::new`], so a loaded split is as
/// valid as a constructed one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSplit", into = "RawSplit")]
pub struct Split {
    train: Vec<usize>,
    test: Vec<usize>,
    roles: Vec<SetRole>,
}

/// Serialized form of [`Split`].
#[derive(Serialize, Deserialize)]
struct RawSplit {
    train: Vec<usize>,
    test: Vec<usize>,
    len: usize,
}

impl TryFrom<RawSplit> for Split {
    type Error = Error;

    fn try_from(raw: RawSplit) -> Result<Self> {
        Self::new(raw.train, raw.test, raw.len)
    }
}

impl From<Split> for RawSplit {
    fn from(split: Split) -> Self {
        Self {
            len: split.roles.len(),
            train: split.train,
            test: split.test,
        }
    }
}

impl Split {
    /// Validate an externally produced partition of `n` rows.
    ///
    /// `train` keeps its given order.
    pub fn new(train: Vec<usize>, test: Vec<usize>, n: usize) -> Result<Self> {
        if train.is_empty() {
            return Err(Error::InsufficientTrainData {
                required: 1,
                found: 0,
            });
        }
        util::check_indices(&train, n)?;
        util::check_indices(&test, n)?;

        let mut roles: Vec<Option<SetRole>> = vec![None; n];
        for (indices, role) in [(&train, SetRole::Train), (&test, SetRole::Test)] {
            for &i in indices {
                if roles[i].replace(role).is_some() {
                    return Err(Error::InvalidSplit {
                        message: "index appears more than once",
                    });
                }
            }
        }
        let roles = roles
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or(Error::InvalidSplit {
                message: "train and test do not cover every row",
            })?;

        Ok(Self { train, test, roles })
    }

    /// Every row in train, none held out.
    pub fn all(n: usize) -> Result<Self> {
        Self::new((0..n).collect(), Vec::new(), n)
    }

    /// Uniform shuffle of `0..n`, then the first `floor(n * train_ratio)` go to train.
    pub fn shuffled<R: Rng + ?Sized>(n: usize, train_ratio: f64, rng: &mut R) -> Result<Self> {
        if !(train_ratio > 0.0 && train_ratio <= 1.0) {
            return Err(Error::InvalidParameter {
                name: "train_ratio",
                message: "must be in (0, 1]",
            });
        }
        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(rng);
        let n_train = (n as f64 * train_ratio).floor() as usize;
        let test = indices.split_off(n_train);
        Self::new(indices, test, n)
    }

    /// Training indices, in order.
    pub fn train(&self) -> &[usize] {
        &self.train
    }

    /// Held-out indices.
    pub fn test(&self) -> &[usize] {
        &self.test
    }

    /// Total number of rows.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// False for any valid split.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Role of row `i`, or `None` when out of range.
    pub fn role(&self, i: usize) -> Option<SetRole> {
        self.roles.get(i).copied()
    }

    /// Whether row `i` is a training row.
    pub fn is_train(&self, i: usize) -> bool {
        self.role(i) == Some(SetRole::Train)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_split() {
        let s = Split::new(vec![3, 0, 2], vec![1], 4).unwrap();
        assert_eq!(s.train(), &[3, 0, 2]);
        assert_eq!(s.role(1), Some(SetRole::Test));
        assert!(s.is_train(3));
        assert_eq!(s.role(4), None);
    }

    #[test]
    fn test_rejects_overlap_and_gaps() {
        assert!(matches!(
            Split::new(vec![0, 1], vec![1, 2], 3),
            Err(Error::InvalidSplit { .. })
        ));
        assert!(matches!(
            Split::new(vec![0, 1], vec![], 3),
            Err(Error::InvalidSplit { .. })
        ));
        assert!(matches!(
            Split::new(vec![0, 0], vec![1], 2),
            Err(Error::InvalidSplit { .. })
        ));
        assert!(matches!(
            Split::new(vec![], vec![0], 1),
            Err(Error::InsufficientTrainData { .. })
        ));
        assert!(matches!(
            Split::new(vec![0, 5], vec![], 2),
            Err(Error::IndexOutOfBounds { index: 5, len: 2 })
        ));
    }

    #[test]
    fn test_shuffled_ratio_and_coverage() {
        let mut rng = StdRng::seed_from_u64(9);
        let s = Split::shuffled(10, 0.8, &mut rng).unwrap();
        assert_eq!(s.train().len(), 8);
        assert_eq!(s.test().len(), 2);
        let mut all: Vec<usize> = s.train().iter().chain(s.test()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffled_is_seed_deterministic() {
        let a = Split::shuffled(50, 0.7, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = Split::shuffled(50, 0.7, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffled_rejects_bad_ratio() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(Split::shuffled(10, 0.0, &mut rng).is_err());
        assert!(Split::shuffled(10, 1.2, &mut rng).is_err());
        // floor(3 * 0.2) == 0 leaves no training row.
        assert!(Split::shuffled(3, 0.2, &mut rng).is_err());
    }

    #[test]
    fn test_json_round_trip_revalidates() {
        let s = Split::new(vec![2, 0], vec![1], 3).unwrap();
        let json = serde_json::to_string(&s).unwrap();
        let back: Split = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
        assert_eq!(back.role(1), Some(SetRole::Test));

        let overlapping = r#"{"train":[0,1],"test":[1],"len":2}"#;
        assert!(serde_json::from_str::<Split>(overlapping).is_err());
        let gap = r#"{"train":[0],"test":[],"len":2}"#;
        assert!(serde_json::from_str::<Split>(gap).is_err());
    }

    #[test]
    fn test_all() {
        let s = Split::all(3).unwrap();
        assert_eq!(s.train(), &[0, 1, 2]);
        assert!(s.test().is_empty());
    }
}
