use thiserror::Error;

/// Errors returned by the analysis stages in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Document-frequency filters removed every candidate term.
    #[error("empty vocabulary: no term survives min_df={min_df}, max_df={max_df}")]
    EmptyVocabulary {
        /// Minimum document count used for filtering.
        min_df: usize,
        /// Maximum document-frequency ratio used for filtering.
        max_df: f64,
    },

    /// Not enough training rows to fit statistics.
    #[error("insufficient training data: need at least {required} rows, found {found}")]
    InsufficientTrainData {
        /// Minimum number of training rows.
        required: usize,
        /// Number of training rows supplied.
        found: usize,
    },

    /// Requested principal-component count is incompatible with the feature space.
    #[error("invalid component count: requested {requested}, but matrix has {n_features} features")]
    InvalidComponentCount {
        /// Requested number of components.
        requested: usize,
        /// Number of available feature dimensions.
        n_features: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Rows of a matrix (or a matrix and its fitted statistics) have inconsistent widths.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A row index refers past the end of the data.
    #[error("index {index} out of bounds for {len} rows")]
    IndexOutOfBounds {
        /// Offending index.
        index: usize,
        /// Number of rows.
        len: usize,
    },

    /// Train/test index sets overlap or do not cover every row.
    #[error("invalid split: {message}")]
    InvalidSplit {
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Eigen-decomposition input is not symmetric.
    #[error("matrix is not symmetric at ({row}, {col})")]
    NotSymmetric {
        /// Row of the first asymmetric pair found.
        row: usize,
        /// Column of the first asymmetric pair found.
        col: usize,
    },

    /// NaN or infinite entry in an input matrix.
    #[error("non-finite value at ({row}, {col})")]
    NonFiniteValue {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
