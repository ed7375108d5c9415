use std::fmt;

use serde::{Deserialize, Serialize};

/// One point in the tokenization search space.
///
/// Params are plain value objects: equal params always produce identical
/// tokenization. The profile prefix is carried even when the profile field
/// is disabled so the sweep enumerates the full cross product.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenizerParams {
    use_profile: bool,
    lowercase: bool,
    keep_punctuation: bool,
    profile_prefix: String,
    collapse_urls: bool,
    collapse_mentions: bool,
}

impl TokenizerParams {
    pub fn new(
        use_profile: bool,
        lowercase: bool,
        keep_punctuation: bool,
        profile_prefix: impl Into<String>,
        collapse_urls: bool,
        collapse_mentions: bool,
    ) -> Self {
        Self {
            use_profile,
            lowercase,
            keep_punctuation,
            profile_prefix: profile_prefix.into(),
            collapse_urls,
            collapse_mentions,
        }
    }

    /// Enumerate the full 64-point cross product of settings.
    ///
    /// The order is fixed: `use_profile` varies slowest, `collapse_mentions`
    /// fastest, with `"d="` enumerated before the empty prefix. The sweep's
    /// ranking tie-break relies on this order being stable across runs.
    #[must_use]
    pub fn grid() -> Vec<Self> {
        const TOGGLES: [bool; 2] = [true, false];
        const PREFIXES: [&str; 2] = ["d=", ""];

        let mut configurations = Vec::with_capacity(64);
        for use_profile in TOGGLES {
            for lowercase in TOGGLES {
                for keep_punctuation in TOGGLES {
                    for profile_prefix in PREFIXES {
                        for collapse_urls in TOGGLES {
                            for collapse_mentions in TOGGLES {
                                configurations.push(Self::new(
                                    use_profile,
                                    lowercase,
                                    keep_punctuation,
                                    profile_prefix,
                                    collapse_urls,
                                    collapse_mentions,
                                ));
                            }
                        }
                    }
                }
            }
        }
        configurations
    }

    /// The six `key=value` labels describing this configuration, in field
    /// order. The aggregator marginalizes accuracy over these.
    #[must_use]
    pub fn setting_labels(&self) -> [String; 6] {
        [
            format!("use_profile={}", self.use_profile),
            format!("lowercase={}", self.lowercase),
            format!("keep_punctuation={}", self.keep_punctuation),
            format!("profile_prefix={}", self.profile_prefix),
            format!("collapse_urls={}", self.collapse_urls),
            format!("collapse_mentions={}", self.collapse_mentions),
        ]
    }

    #[must_use]
    pub fn use_profile(&self) -> bool {
        self.use_profile
    }

    #[must_use]
    pub fn lowercase(&self) -> bool {
        self.lowercase
    }

    #[must_use]
    pub fn keep_punctuation(&self) -> bool {
        self.keep_punctuation
    }

    #[must_use]
    pub fn profile_prefix(&self) -> &str {
        &self.profile_prefix
    }

    #[must_use]
    pub fn collapse_urls(&self) -> bool {
        self.collapse_urls
    }

    #[must_use]
    pub fn collapse_mentions(&self) -> bool {
        self.collapse_mentions
    }
}

impl Default for TokenizerParams {
    fn default() -> Self {
        Self::new(true, true, true, "d=", true, true)
    }
}

impl fmt::Display for TokenizerParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.setting_labels().join(" "))
    }
}
