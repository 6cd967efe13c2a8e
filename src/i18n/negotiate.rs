//! Language negotiation: pick which language variant of a message to use.

use crate::i18n::preferences_from_header;

/// Fallback language when neither the route nor the global options name one.
pub const DEFAULT_LANG: &str = "en";

/// Per-request language inputs.
///
/// `preferences` comes from the request header, `default_lang` from
/// registration-time configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiationContext {
    pub preferences: Vec<String>,
    pub default_lang: String,
}

impl NegotiationContext {
    pub fn new(preferences: Vec<String>, default_lang: impl Into<String>) -> Self {
        Self {
            preferences,
            default_lang: default_lang.into(),
        }
    }

    /// Build from a raw `Accept-Language` value (absent or malformed means no preferences).
    pub fn from_header(header: Option<&str>, default_lang: impl Into<String>) -> Self {
        Self::new(preferences_from_header(header), default_lang)
    }
}

impl Default for NegotiationContext {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_LANG)
    }
}

/// Choose a language tag from `available`.
///
/// Returns the first client preference that names an available tag (compared
/// case-insensitively, returned in the spelling of `available`). With no match,
/// returns `default_lang` even when it is not itself available.
pub fn negotiate<'a, I>(preferences: &[String], available: I, default_lang: &'a str) -> &'a str
where
    I: IntoIterator<Item = &'a String> + Clone,
{
    for preference in preferences {
        if let Some(tag) = available
            .clone()
            .into_iter()
            .find(|tag| tag.eq_ignore_ascii_case(preference))
        {
            return tag;
        }
    }

    default_lang
}
