use demog_model::ModelError;
use thiserror::Error;

/// Errors raised by the evaluation and search layers.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The requested fold count cannot produce non-empty folds.
    #[error("fold count must be at least 2 and at most the document count (k={k}, documents={n_docs})")]
    InvalidFoldCount { k: usize, n_docs: usize },

    /// Document and label collections disagree in length.
    #[error("corpus has {n_docs} documents but {n_labels} labels")]
    CorpusMismatch { n_docs: usize, n_labels: usize },

    /// The underlying classifier failed.
    #[error(transparent)]
    Model(#[from] ModelError),
}
