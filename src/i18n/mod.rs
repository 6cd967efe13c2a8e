//! Internationalization (i18n) support for override messages.
//!
//! Override rules may carry one template per language. This module decides
//! which of those templates a request gets.
//!
//! # Architecture
//!
//! - `accept`: Parses the `Accept-Language` header into ordered preferences
//! - `negotiate`: Matches preferences against the languages a rule provides
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::{negotiate, NegotiationContext};
//!
//! let context = NegotiationContext::from_header(Some("fr, zh;q=0.9"), "en");
//! let lang = negotiate(&context.preferences, rules.keys(), &context.default_lang);
//! ```

mod accept;
mod negotiate;

pub use accept::{parse_accept_language, preferences_from_header, AcceptLanguageError};
pub use negotiate::{negotiate, NegotiationContext, DEFAULT_LANG};
