//! Client-facing error envelope built from a validation failure.

use crate::failure::{Source, ValidationFailure};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Which request part failed and which fields were involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub source: Source,
    /// HTML-escaped field paths, in issue order
    pub keys: Vec<String>,
}

/// 400 response body handed to the HTTP layer.
///
/// The originating failure stays attached as `data` so later handlers can
/// still inspect library-specific detail. It is never sent to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub status_code: u16,
    pub error: &'static str,
    pub message: String,
    pub validation: ValidationSummary,
    #[serde(skip)]
    pub data: ValidationFailure,
}

impl ErrorEnvelope {
    fn bad_request(message: String, failure: ValidationFailure) -> Self {
        let keys = failure
            .issues
            .iter()
            .map(|issue| escape_html(&issue.path))
            .collect();

        Self {
            status_code: StatusCode::BAD_REQUEST.as_u16(),
            error: "Bad Request",
            message,
            validation: ValidationSummary {
                source: failure.source,
                keys,
            },
            data: failure,
        }
    }

    /// Envelope the host produces for a failure nobody rewrote.
    ///
    /// Uses the library's aggregate message.
    pub fn unmodified(failure: ValidationFailure) -> Self {
        let message = failure.message.clone();
        Self::bad_request(message, failure)
    }
}

/// Wrap a rewritten failure. The message is the first issue's message.
pub fn wrap(failure: ValidationFailure) -> ErrorEnvelope {
    let message = failure.first_message().to_string();
    ErrorEnvelope::bad_request(message, failure)
}

impl IntoResponse for ErrorEnvelope {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST);
        (status, Json(self)).into_response()
    }
}

/// Escape text for safe inclusion in HTML.
///
/// ASCII letters, digits, space and `.,-_:` are kept; a handful of characters
/// get named entities; everything else becomes a numeric character reference.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());

    for c in input.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | ',' | '-' | '_' | ':') {
            escaped.push(c);
            continue;
        }

        match named_entity(c) {
            Some(entity) => escaped.push_str(entity),
            None => {
                let code = c as u32;
                if code < 256 {
                    escaped.push_str(&format!("&#x{:02x};", code));
                } else {
                    escaped.push_str(&format!("&#{};", code));
                }
            }
        }
    }

    escaped
}

fn named_entity(c: char) -> Option<&'static str> {
    let entity = match c {
        '&' => "&amp;",
        '<' => "&lt;",
        '>' => "&gt;",
        '"' => "&quot;",
        '\u{a0}' => "&nbsp;",
        '\u{a2}' => "&cent;",
        '\u{a3}' => "&pound;",
        '\u{a4}' => "&curren;",
        '\u{a9}' => "&copy;",
        '\u{ae}' => "&reg;",
        _ => return None,
    };
    Some(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::ValidationIssue;
    use serde_json::json;

    fn failure() -> ValidationFailure {
        let mut failure = ValidationFailure::new(
            Source::Params,
            "child \"id\" fails because [...]",
            vec![
                ValidationIssue::new("id", "string.regex.base", "Bad id: 10"),
                ValidationIssue::new("<b>", "any.required", "second"),
            ],
        );
        failure.extra.insert("_object".to_string(), json!({ "id": "10" }));
        failure
    }

    #[test]
    fn test_wrap_uses_first_issue_message() {
        let envelope = wrap(failure());
        assert_eq!(envelope.status_code, 400);
        assert_eq!(envelope.message, "Bad id: 10");
        assert_eq!(envelope.validation.source, Source::Params);
        assert_eq!(envelope.validation.keys, vec!["id", "&lt;b&gt;"]);
    }

    #[test]
    fn test_unmodified_uses_aggregate_message() {
        let envelope = ErrorEnvelope::unmodified(failure());
        assert_eq!(envelope.message, "child \"id\" fails because [...]");
        assert_eq!(envelope.validation.keys.len(), 2);
    }

    #[test]
    fn test_library_data_preserved_but_not_serialized() {
        let envelope = wrap(failure());
        assert_eq!(envelope.data.extra.get("_object"), Some(&json!({ "id": "10" })));

        let body = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            body,
            json!({
                "statusCode": 400,
                "error": "Bad Request",
                "message": "Bad id: 10",
                "validation": { "source": "params", "keys": ["id", "&lt;b&gt;"] }
            })
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = wrap(failure()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_escape_html_safe_chars() {
        assert_eq!(escape_html("user_name-1.a, b"), "user_name-1.a, b");
        assert_eq!(escape_html("a:b"), "a:b");
    }

    #[test]
    fn test_escape_html_entities() {
        assert_eq!(escape_html("a&b\"c"), "a&amp;b&quot;c");
        assert_eq!(escape_html("'/"), "&#x27;&#x2f;");
        assert_eq!(escape_html("\u{a9}"), "&copy;");
        assert_eq!(escape_html("é"), "&#xe9;");
        assert_eq!(escape_html("名"), "&#21517;");
    }

    #[test]
    fn test_escape_html_empty() {
        assert_eq!(escape_html(""), "");
    }
}
