//! Structured validation failures as produced by the request-validation layer.
//!
//! A `ValidationFailure` belongs to exactly one request. The rewriter mutates
//! its issues in place; nothing here is shared across requests.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Part of the request a failure was raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Params,
    Query,
    Payload,
    Headers,
    State,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Params => "params",
            Source::Query => "query",
            Source::Payload => "payload",
            Source::Headers => "headers",
            Source::State => "state",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level problem reported by the validation library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Flat key of the offending field (e.g. "id")
    pub path: String,

    /// Stable identifier of the rule that failed (e.g. "string.regex.base")
    #[serde(rename = "type")]
    pub kind: String,

    /// Placeholder values available to message templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,

    /// User-facing text, initially generated by the library
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: kind.into(),
            context: None,
            message: message.into(),
        }
    }

    /// Attach a placeholder value to the issue's context.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Every issue found while validating one request source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub source: Source,

    /// Aggregate message the library derived for the whole failure
    pub message: String,

    /// Issues in the order the library reported them
    #[serde(rename = "details")]
    pub issues: Vec<ValidationIssue>,

    /// Library-specific diagnostics that are carried along untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ValidationFailure {
    pub fn new(source: Source, message: impl Into<String>, issues: Vec<ValidationIssue>) -> Self {
        Self {
            source,
            message: message.into(),
            issues,
            extra: Map::new(),
        }
    }

    /// Message of the first issue, falling back to the aggregate message.
    pub fn first_message(&self) -> &str {
        self.issues
            .first()
            .map(|issue| issue.message.as_str())
            .unwrap_or(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Source::Payload).unwrap(), json!("payload"));
        assert_eq!(Source::Headers.to_string(), "headers");
    }

    #[test]
    fn test_failure_deserializes_library_shape() {
        let failure: ValidationFailure = serde_json::from_value(json!({
            "source": "params",
            "message": "child \"id\" fails",
            "details": [{
                "path": "id",
                "type": "string.regex.base",
                "context": { "key": "id", "value": "10" },
                "message": "\"id\" fails to match"
            }],
            "_object": { "id": "10" }
        }))
        .unwrap();

        assert_eq!(failure.source, Source::Params);
        assert_eq!(failure.issues.len(), 1);
        assert_eq!(failure.issues[0].kind, "string.regex.base");
        assert_eq!(failure.extra.get("_object"), Some(&json!({ "id": "10" })));
    }

    #[test]
    fn test_extra_fields_survive_serialization() {
        let mut failure = ValidationFailure::new(Source::Query, "bad", vec![]);
        failure.extra.insert("annotated".to_string(), json!(true));

        let value = serde_json::to_value(&failure).unwrap();
        assert_eq!(value["annotated"], json!(true));
        assert_eq!(value["details"], json!([]));
    }

    #[test]
    fn test_first_message_falls_back_to_aggregate() {
        let empty = ValidationFailure::new(Source::State, "aggregate", vec![]);
        assert_eq!(empty.first_message(), "aggregate");

        let failure = ValidationFailure::new(
            Source::State,
            "aggregate",
            vec![ValidationIssue::new("a", "any.required", "first")],
        );
        assert_eq!(failure.first_message(), "first");
    }

    #[test]
    fn test_with_context_builds_map() {
        let issue = ValidationIssue::new("age", "number.min", "too small")
            .with_context("limit", 18)
            .with_context("key", "age");

        let context = issue.context.unwrap();
        assert_eq!(context.get("limit"), Some(&json!(18)));
        assert_eq!(context.get("key"), Some(&json!("age")));
    }
}
