use std::borrow::Cow;

use demog_model::Gender;
use demog_pre_processing::{
    Document,
    pre_processor::{CountVectorizer, TokenizerParams},
};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::{cross_validation::cross_validate, error::SearchError};

/// Cross-validated accuracy achieved by one tokenizer configuration.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    pub accuracy: f64,
    pub params: TokenizerParams,
}

fn progress_bar_setup(len: usize, message: impl Into<Cow<'static, str>>) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message);
    pb
}

/// Evaluate every tokenizer configuration and rank the results.
///
/// Runs the full pipeline (tokenize → vocabulary → count matrix → k-fold
/// cross-validation) for each of the 64 grid points. Trials are independent
/// — each owns its tokenized corpus, vocabulary and matrix — so they run in
/// parallel; results are collected in enumeration order and then ranked by
/// descending accuracy with a stable sort, so exact ties keep the grid's
/// enumeration order.
pub fn evaluate_all_configurations(
    documents: &[Document],
    labels: &[Gender],
    k: usize,
) -> Result<Vec<EvaluationResult>, SearchError> {
    if documents.len() != labels.len() {
        return Err(SearchError::CorpusMismatch {
            n_docs: documents.len(),
            n_labels: labels.len(),
        });
    }

    let grid = TokenizerParams::grid();
    debug!(
        num_configurations = grid.len(),
        num_documents = documents.len(),
        "Starting configuration sweep"
    );
    let pb = progress_bar_setup(grid.len(), "Evaluating configurations");

    let mut results = grid
        .into_par_iter()
        .progress_with(pb.clone())
        .map(|params| {
            let (_, x) = CountVectorizer::fit_transform(documents, params.clone());
            let accuracy = cross_validate(&x, labels, k)?;
            Ok(EvaluationResult { accuracy, params })
        })
        .collect::<Result<Vec<_>, SearchError>>()?;
    pb.finish_with_message("Configuration sweep complete");

    results.sort_by(|a, b| b.accuracy.total_cmp(&a.accuracy));
    Ok(results)
}
