use serde::{Deserialize, Serialize};

/// A social-media message paired with the author's optional profile text.
///
/// The ground-truth label is carried separately; documents themselves are
/// label-free so the tokenizer can never peek at it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// The message body.
    pub text: String,
    /// Free-form profile/bio text, when the author has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

impl Document {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            profile: None,
        }
    }

    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }
}
