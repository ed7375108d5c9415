use ahash::HashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Token → column index mapping, frozen per configuration.
///
/// Indices are assigned in first-seen order while scanning documents in
/// their given order, and are never reassigned, so the mapping is a pure
/// function of (corpus order, tokenization). `tokens` is the inverse:
/// `tokens[index]` is the token that owns `index`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    index: HashMap<String, usize>,
    tokens: Vec<String>,
}

impl Vocabulary {
    /// Scan token sequences in order, giving each unseen token the next
    /// index, starting at 0.
    #[must_use]
    pub fn fit(token_sequences: &[Vec<String>]) -> Self {
        let mut vocabulary = Self::default();
        for tokens in token_sequences {
            for token in tokens {
                if !vocabulary.index.contains_key(token) {
                    vocabulary
                        .index
                        .insert(token.clone(), vocabulary.tokens.len());
                    vocabulary.tokens.push(token.clone());
                }
            }
        }
        debug!(vocab_size = vocabulary.len(), "Vocabulary built");
        vocabulary
    }

    #[must_use]
    pub fn get(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// The token owning `index`, for coefficient interpretation.
    #[must_use]
    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
