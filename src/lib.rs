//! Route-scoped rewriting of request-validation error messages.
//!
//! Routes supply override tables keyed by source, field path and failure
//! kind. When validation fails, matching issue messages are replaced
//! (optionally per language, negotiated from `Accept-Language`), placeholders
//! are filled from the issue context, and the result is wrapped into the 400
//! envelope the HTTP layer renders.

pub mod config;
pub mod envelope;
pub mod fail_action;
pub mod failure;
pub mod i18n;
pub mod interpolate;
pub mod overrides;
pub mod rewrite;
pub mod server;
