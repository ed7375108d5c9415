use thiserror::Error;

/// Errors raised by classifier training and prediction.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Prediction was requested before `fit`.
    #[error("model has not been fitted yet")]
    NotFitted,

    /// The feature matrix was built against a different vocabulary than the
    /// model was trained on.
    #[error("feature count mismatch: model has {expected} features, matrix has {found} columns")]
    DimensionMismatch { expected: usize, found: usize },

    /// Row count and label count disagree.
    #[error("matrix has {rows} rows but {labels} labels were supplied")]
    LengthMismatch { rows: usize, labels: usize },

    /// The document set is empty.
    #[error("document set is empty")]
    Empty,
}
