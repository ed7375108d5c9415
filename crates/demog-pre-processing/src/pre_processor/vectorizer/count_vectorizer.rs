use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use sprs::CsMat;
use tracing::debug;

use super::vocabulary::Vocabulary;
use crate::{
    Document,
    pre_processor::{TokenizerParams, tokenizer::document_to_tokens},
};

/// Token-count vectorizer bound to one tokenizer configuration.
///
/// `fit` freezes a vocabulary from the training documents; `transform`
/// vectorizes any document set against it, silently dropping tokens the
/// vocabulary has never seen. That drop is what keeps train and held-out
/// vectorization consistent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CountVectorizer {
    params: TokenizerParams,
    vocab: Vocabulary,
}

impl CountVectorizer {
    pub fn fit(documents: &[Document], params: TokenizerParams) -> Self {
        debug!(num_documents = documents.len(), "Fitting CountVectorizer");
        let token_sequences = tokenize_documents(documents, &params);
        Self::fit_from_tokenized(&token_sequences, params)
    }

    fn fit_from_tokenized(token_sequences: &[Vec<String>], params: TokenizerParams) -> Self {
        let vocab = Vocabulary::fit(token_sequences);
        debug!(vocab_size = vocab.len(), "CountVectorizer fitting complete");
        Self { params, vocab }
    }

    pub fn transform(&self, documents: &[Document]) -> CsMat<f64> {
        debug!(
            num_documents = documents.len(),
            "Transforming documents using CountVectorizer"
        );
        let token_sequences = tokenize_documents(documents, &self.params);
        self.transform_from_tokenized(&token_sequences)
    }

    /// Build the CSR matrix directly: one pass over each document's tokens,
    /// so the cost is linear in the total token count.
    fn transform_from_tokenized(&self, token_sequences: &[Vec<String>]) -> CsMat<f64> {
        let mut indptr = Vec::with_capacity(token_sequences.len() + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();

        indptr.push(0);
        for tokens in token_sequences {
            let mut row_counts: AHashMap<usize, f64> = AHashMap::new();
            for token in tokens {
                if let Some(col_idx) = self.vocab.get(token) {
                    *row_counts.entry(col_idx).or_insert(0.0) += 1.0;
                }
            }

            let mut row_entries = row_counts.into_iter().collect::<Vec<_>>();
            row_entries.sort_by_key(|(col_idx, _)| *col_idx);
            for (col_idx, count) in row_entries {
                indices.push(col_idx);
                data.push(count);
            }
            indptr.push(indices.len());
        }

        debug!(
            non_zero_entries = data.len(),
            "Document vectorization complete"
        );
        CsMat::new(
            (token_sequences.len(), self.vocab.len()),
            indptr,
            indices,
            data,
        )
    }

    /// Tokenize once and reuse the sequences for both vocabulary building
    /// and vectorization.
    pub fn fit_transform(documents: &[Document], params: TokenizerParams) -> (Self, CsMat<f64>) {
        let token_sequences = tokenize_documents(documents, &params);
        let vectorizer = Self::fit_from_tokenized(&token_sequences, params);
        let transformed = vectorizer.transform_from_tokenized(&token_sequences);
        (vectorizer, transformed)
    }

    #[must_use]
    pub fn num_features(&self) -> usize {
        self.vocab.len()
    }

    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    #[must_use]
    pub fn params(&self) -> &TokenizerParams {
        &self.params
    }
}

fn tokenize_documents(documents: &[Document], params: &TokenizerParams) -> Vec<Vec<String>> {
    documents
        .iter()
        .map(|document| document_to_tokens(document, params))
        .collect()
}
