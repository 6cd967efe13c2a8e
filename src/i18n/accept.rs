//! `Accept-Language` header parsing.
//!
//! Produces the client's language tags in priority order: highest weight
//! first, ties kept in the order they were declared.

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcceptLanguageError {
    #[error("invalid quality value '{value}' for language '{tag}'")]
    InvalidQuality { tag: String, value: String },
}

/// Parse an `Accept-Language` header value into ordered language tags.
///
/// Tags are trimmed and lower-cased. Entries weighted `q=0` are dropped, as
/// are empty entries. Parameters other than `q` are ignored.
pub fn parse_accept_language(header: &str) -> Result<Vec<String>, AcceptLanguageError> {
    let mut weighted: Vec<(String, f32)> = Vec::new();

    for part in header.split(',') {
        let mut components = part.split(';');
        let tag = components.next().unwrap_or_default().trim().to_ascii_lowercase();
        if tag.is_empty() {
            continue;
        }

        let mut quality = 1.0_f32;
        for param in components {
            let Some((name, value)) = param.split_once('=') else {
                continue;
            };
            if !name.trim().eq_ignore_ascii_case("q") {
                continue;
            }
            quality = parse_quality(value.trim()).ok_or_else(|| AcceptLanguageError::InvalidQuality {
                tag: tag.clone(),
                value: value.trim().to_string(),
            })?;
        }

        if quality > 0.0 {
            weighted.push((tag, quality));
        }
    }

    // Stable sort keeps declaration order among equal weights
    weighted.sort_by(|a, b| b.1.total_cmp(&a.1));

    Ok(weighted.into_iter().map(|(tag, _)| tag).collect())
}

/// Preferences for an optional raw header; absent or malformed means none.
pub fn preferences_from_header(header: Option<&str>) -> Vec<String> {
    match header.map(parse_accept_language) {
        Some(Ok(prefs)) => prefs,
        Some(Err(e)) => {
            debug!("Ignoring Accept-Language header: {}", e);
            Vec::new()
        }
        None => Vec::new(),
    }
}

fn parse_quality(value: &str) -> Option<f32> {
    let q: f32 = value.parse().ok()?;
    (0.0..=1.0).contains(&q).then_some(q)
}
