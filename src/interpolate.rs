//! `{{name}}` placeholder substitution for override messages.

use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::sync::OnceLock;

// Placeholder pattern (cached)
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{\{([^{}]*)\}\}").expect("valid placeholder regex"))
}

/// Replace every `{{name}}` in `template` with the matching context value.
///
/// Only string and number values are substituted. Placeholders whose value is
/// missing, or is a bool, null, array or object, are left exactly as written.
/// Substituted text is never scanned again.
pub fn interpolate(template: &str, context: Option<&Map<String, Value>>) -> String {
    let Some(context) = context else {
        return template.to_string();
    };

    placeholder_regex()
        .replace_all(template, |caps: &Captures| match context.get(&caps[1]) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => caps[0].to_string(),
        })
        .into_owned()
}
