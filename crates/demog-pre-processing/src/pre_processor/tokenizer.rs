use std::sync::LazyLock;

use regex::Regex;

use super::params::TokenizerParams;
use crate::Document;

/// Fixed token substituted for every URL when URL collapsing is on.
pub const URL_SENTINEL: &str = "THIS_IS_A_URL";

/// Fixed token substituted for every @-mention when mention collapsing is on.
pub const MENTION_SENTINEL: &str = "THIS_IS_A_MENTION";

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+").expect("URL pattern compiles"));
static MENTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\S+").expect("mention pattern compiles"));
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("non-word pattern compiles"));

/// Split one text field into tokens.
///
/// Steps, in order: lowercase the whole text, collapse URLs (non-whitespace
/// runs starting with `http`) to [`URL_SENTINEL`], collapse mentions
/// (non-whitespace runs starting with `@`) to [`MENTION_SENTINEL`], then
/// split. With `keep_punctuation` the split is on whitespace only, so
/// word-internal punctuation survives ("isn't" stays one token); without it,
/// every non-alphanumeric, non-underscore character becomes a space first,
/// which fragments "isn't" into "isn" and "t". The sentinels are plain
/// `\w` words, so they survive the stripping intact.
///
/// A non-empty `prefix` is prepended to every resulting token (sentinels
/// included); this namespaces profile tokens away from message tokens of the
/// same spelling.
///
/// Empty input yields an empty vec, never an error.
pub fn tokenize(
    text: &str,
    lowercase: bool,
    keep_punctuation: bool,
    prefix: &str,
    collapse_urls: bool,
    collapse_mentions: bool,
) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut text = if lowercase {
        text.to_lowercase()
    } else {
        text.to_owned()
    };
    if collapse_urls {
        text = URL_PATTERN.replace_all(&text, URL_SENTINEL).into_owned();
    }
    if collapse_mentions {
        text = MENTION_PATTERN
            .replace_all(&text, MENTION_SENTINEL)
            .into_owned();
    }
    let text = if keep_punctuation {
        text
    } else {
        NON_WORD.replace_all(&text, " ").into_owned()
    };
    let words = text.split_whitespace();
    if prefix.is_empty() {
        words.map(str::to_owned).collect()
    } else {
        words.map(|word| format!("{prefix}{word}")).collect()
    }
}

/// Tokenize a whole document under `params`.
///
/// Message tokens come first and are never prefixed; profile tokens follow
/// (prefixed with `profile_prefix`) when the profile field is enabled. Both
/// fields share the same boolean knobs.
#[must_use]
pub fn document_to_tokens(document: &Document, params: &TokenizerParams) -> Vec<String> {
    let mut tokens = tokenize(
        &document.text,
        params.lowercase(),
        params.keep_punctuation(),
        "",
        params.collapse_urls(),
        params.collapse_mentions(),
    );
    if params.use_profile() {
        if let Some(profile) = document.profile.as_deref() {
            tokens.extend(tokenize(
                profile,
                params.lowercase(),
                params.keep_punctuation(),
                params.profile_prefix(),
                params.collapse_urls(),
                params.collapse_mentions(),
            ));
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_internal_punctuation_when_asked() {
        let tokens = tokenize("isn't", true, true, "", false, false);
        assert_eq!(tokens, vec!["isn't"]);
    }

    #[test]
    fn strips_punctuation_and_collapses_urls_and_mentions() {
        let tokens = tokenize("isn't @user http://x.co", true, false, "", true, true);
        assert_eq!(tokens, vec!["isn", "t", MENTION_SENTINEL, URL_SENTINEL]);
    }

    #[test]
    fn empty_text_yields_no_tokens() {
        assert!(tokenize("", true, true, "", true, true).is_empty());
    }

    #[test]
    fn prefix_is_applied_to_every_token() {
        let tokens = tokenize("hello world", true, true, "d=", false, false);
        assert_eq!(tokens, vec!["d=hello", "d=world"]);
    }

    #[test]
    fn url_collapse_sees_the_lowercased_text() {
        // The pattern is anchored on a literal "http", so an uppercase scheme
        // only collapses when lowercasing runs first.
        let kept = tokenize("HTTP://x.co", false, true, "", true, false);
        assert_eq!(kept, vec!["HTTP://x.co"]);
        let collapsed = tokenize("HTTP://x.co", true, true, "", true, false);
        assert_eq!(collapsed, vec![URL_SENTINEL]);
    }

    #[test]
    fn sentinels_survive_punctuation_stripping() {
        let tokens = tokenize("see http://a.io/x?y=1", true, false, "", true, false);
        assert_eq!(tokens, vec!["see", URL_SENTINEL]);
    }

    #[test]
    fn tokenization_is_deterministic() {
        let text = "Hey @friend check https://demo.example NOW!";
        let first = tokenize(text, true, false, "", true, true);
        let second = tokenize(text, true, false, "", true, true);
        assert_eq!(first, second);
    }

    #[test]
    fn profile_tokens_are_appended_with_prefix() {
        let doc = Document::new("good morning").with_profile("rust dev");
        let tokens = document_to_tokens(&doc, &TokenizerParams::default());
        assert_eq!(tokens, vec!["good", "morning", "d=rust", "d=dev"]);
    }

    #[test]
    fn missing_profile_contributes_nothing() {
        let doc = Document::new("just text");
        let tokens = document_to_tokens(&doc, &TokenizerParams::default());
        assert_eq!(tokens, vec!["just", "text"]);
    }

    #[test]
    fn profile_is_ignored_when_disabled() {
        let doc = Document::new("a").with_profile("b");
        let params = TokenizerParams::new(false, true, true, "d=", true, true);
        assert_eq!(document_to_tokens(&doc, &params), vec!["a"]);
    }
}
