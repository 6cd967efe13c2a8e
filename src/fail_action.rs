//! Failure handling chain for a route.
//!
//! A `FailureHandler` is composed once, when a route is registered: the
//! override rewriter runs first, then whatever failure action the route had
//! before (if any) receives the resulting envelope. Without a previous action
//! the envelope itself becomes the response.

use crate::envelope::{wrap, ErrorEnvelope};
use crate::failure::{Source, ValidationFailure};
use crate::i18n::{NegotiationContext, DEFAULT_LANG};
use crate::overrides::RouteOverrides;
use crate::rewrite::{rewrite, RewriteOutcome};
use axum::{
    http::{header::ACCEPT_LANGUAGE, HeaderMap},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

/// A route-level reaction to a validation failure.
pub trait FailAction: Send + Sync {
    fn fail(&self, headers: &HeaderMap, source: Source, error: ErrorEnvelope) -> Response;
}

impl<F> FailAction for F
where
    F: Fn(&HeaderMap, Source, ErrorEnvelope) -> Response + Send + Sync,
{
    fn fail(&self, headers: &HeaderMap, source: Source, error: ErrorEnvelope) -> Response {
        self(headers, source, error)
    }
}

/// Global options shared by every registered route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub default_lang: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            default_lang: DEFAULT_LANG.to_string(),
        }
    }
}

/// Composed failure handler for one route.
#[derive(Clone)]
pub struct FailureHandler {
    overrides: Arc<RouteOverrides>,
    default_lang: String,
    original: Option<Arc<dyn FailAction>>,
}

impl FailureHandler {
    /// Compose the handler for a route.
    ///
    /// The route's own `defaultLang` wins over the global one.
    pub fn register(
        options: &Options,
        overrides: RouteOverrides,
        original: Option<Arc<dyn FailAction>>,
    ) -> Self {
        let default_lang = overrides
            .default_lang
            .clone()
            .unwrap_or_else(|| options.default_lang.clone());

        Self {
            overrides: Arc::new(overrides),
            default_lang,
            original,
        }
    }

    pub fn default_lang(&self) -> &str {
        &self.default_lang
    }

    /// Handle one request's validation failure.
    pub fn handle(&self, headers: &HeaderMap, mut failure: ValidationFailure) -> Response {
        let source = failure.source;
        let accept_language = headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());
        let negotiation = NegotiationContext::from_header(accept_language, self.default_lang.as_str());

        let envelope = match rewrite(&mut failure, &self.overrides, &negotiation) {
            RewriteOutcome::PassThrough => {
                debug!(source = %source, "No override messages for source, passing failure through");
                ErrorEnvelope::unmodified(failure)
            }
            RewriteOutcome::Rewritten { rewritten } => {
                debug!(source = %source, rewritten, "Applied override messages");
                wrap(failure)
            }
        };

        self.respond(headers, source, envelope)
    }

    fn respond(&self, headers: &HeaderMap, source: Source, envelope: ErrorEnvelope) -> Response {
        match &self.original {
            Some(original) => original.fail(headers, source, envelope),
            None => envelope.into_response(),
        }
    }
}

impl std::fmt::Debug for FailureHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FailureHandler")
            .field("overrides", &self.overrides)
            .field("default_lang", &self.default_lang)
            .field("has_original", &self.original.is_some())
            .finish()
    }
}
