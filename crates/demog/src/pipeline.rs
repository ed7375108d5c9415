use std::{fs, io, path::Path};

use demog_model::{Gender, LogisticRegression, ModelError, Prediction};
use demog_pre_processing::{
    Document,
    pre_processor::{CountVectorizer, TokenizerParams, Vocabulary},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SearchError;

/// A vectorizer frozen on the training corpus plus the classifier trained
/// on all of it.
///
/// Built once from the winning configuration after the sweep; its vocabulary
/// is never rebuilt, so held-out documents vectorize consistently with the
/// training data (tokens unseen in training simply vanish).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedPipeline {
    vectorizer: CountVectorizer,
    model: LogisticRegression,
}

impl FittedPipeline {
    /// Re-tokenize and re-vectorize the entire corpus with `params` (no
    /// train/test split) and train one classifier on all of it.
    pub fn fit(
        documents: &[Document],
        labels: &[Gender],
        params: TokenizerParams,
    ) -> Result<Self, SearchError> {
        if documents.len() != labels.len() {
            return Err(SearchError::CorpusMismatch {
                n_docs: documents.len(),
                n_labels: labels.len(),
            });
        }
        info!(
            num_documents = documents.len(),
            params = %params,
            "Refitting classifier on the full corpus"
        );
        let (vectorizer, x) = CountVectorizer::fit_transform(documents, params);
        let mut model = LogisticRegression::new();
        model.fit(&x, labels)?;
        Ok(Self { vectorizer, model })
    }

    /// Probability estimates for `documents`, vectorized against the frozen
    /// vocabulary.
    pub fn predict(&self, documents: &[Document]) -> Result<Vec<Prediction>, ModelError> {
        let x = self.vectorizer.transform(documents);
        self.model.predict_proba(&x)
    }

    /// The `n` most characteristic tokens for `class`.
    ///
    /// For Female (the positive class) these are the largest coefficients in
    /// descending order; for Male, the most negative coefficients, ascending.
    /// Asks for more tokens than the vocabulary holds come back clamped.
    pub fn top_coefficients(
        &self,
        class: Gender,
        n: usize,
    ) -> Result<Vec<(String, f64)>, ModelError> {
        let coefficients = self.model.coefficients()?;
        let mut order: Vec<usize> = (0..coefficients.len()).collect();
        match class {
            Gender::Female => order.sort_by(|&a, &b| coefficients[b].total_cmp(&coefficients[a])),
            Gender::Male => order.sort_by(|&a, &b| coefficients[a].total_cmp(&coefficients[b])),
        }
        Ok(order
            .into_iter()
            .take(n)
            .filter_map(|col_idx| {
                self.vectorizer
                    .vocabulary()
                    .token(col_idx)
                    .map(|token| (token.to_owned(), coefficients[col_idx]))
            })
            .collect())
    }

    #[must_use]
    pub fn params(&self) -> &TokenizerParams {
        self.vectorizer.params()
    }

    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        self.vectorizer.vocabulary()
    }

    #[must_use]
    pub fn vectorizer(&self) -> &CountVectorizer {
        &self.vectorizer
    }

    #[must_use]
    pub fn model(&self) -> &LogisticRegression {
        &self.model
    }

    /// Save the whole pipeline (params, vocabulary, weights) as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }

    /// Load a pipeline saved with [`FittedPipeline::save`].
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
