//! Override rule tables and rule resolution.
//!
//! A route's table is keyed source -> field path -> failure kind. Tables are
//! built once at registration time and only ever read afterwards.

//!
//! Loading is lenient: entries of the wrong shape are dropped (or kept as
//! `Unsupported`) with a warning, so one bad entry never discards the rest of
//! a route's rules.

use crate::failure::Source;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// Replacement message for one (field, failure kind) pair.
#[derive(Debug, Clone, PartialEq)]
pub enum OverrideRule {
    /// A single template used for every language
    Text(String),

    /// Templates keyed by language tag
    Localized(BTreeMap<String, String>),

    /// Any other shape (arrays, numbers, ...). Resolves but never rewrites.
    Unsupported(Value),
}

impl OverrideRule {
    /// Classify a raw rule value.
    ///
    /// Language variants that are not strings are dropped; the remaining
    /// variants stay usable.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(template) => OverrideRule::Text(template),
            Value::Object(variants) => {
                let mut templates = BTreeMap::new();
                for (lang, template) in variants {
                    match template {
                        Value::String(template) => {
                            templates.insert(lang, template);
                        }
                        other => warn!(lang = %lang, value = %other, "Dropping non-string language variant"),
                    }
                }
                OverrideRule::Localized(templates)
            }
            other => OverrideRule::Unsupported(other),
        }
    }
}

impl<'de> Deserialize<'de> for OverrideRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(OverrideRule::from_value)
    }
}

/// Failure kind -> rule, for one field.
pub type FieldRules = HashMap<String, OverrideRule>;

/// Field path -> rules, for one source.
pub type SourceRules = HashMap<String, FieldRules>;

/// Per-route override configuration.
///
/// Besides the per-source tables a route may pin its own default language,
/// which takes precedence over the global one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteOverrides {
    #[serde(default)]
    pub default_lang: Option<String>,
    #[serde(default, deserialize_with = "lenient_source")]
    pub params: Option<SourceRules>,
    #[serde(default, deserialize_with = "lenient_source")]
    pub query: Option<SourceRules>,
    #[serde(default, deserialize_with = "lenient_source")]
    pub payload: Option<SourceRules>,
    #[serde(default, deserialize_with = "lenient_source")]
    pub headers: Option<SourceRules>,
    #[serde(default, deserialize_with = "lenient_source")]
    pub state: Option<SourceRules>,
}

impl RouteOverrides {
    /// Rules configured for `source`.
    ///
    /// `None` means the route configured nothing for this source, which is
    /// different from an empty table.
    pub fn messages_for(&self, source: Source) -> Option<&SourceRules> {
        match source {
            Source::Params => self.params.as_ref(),
            Source::Query => self.query.as_ref(),
            Source::Payload => self.payload.as_ref(),
            Source::Headers => self.headers.as_ref(),
            Source::State => self.state.as_ref(),
        }
    }

    /// Builder-style setter used when assembling tables in code.
    pub fn with_source(mut self, source: Source, rules: SourceRules) -> Self {
        let slot = match source {
            Source::Params => &mut self.params,
            Source::Query => &mut self.query,
            Source::Payload => &mut self.payload,
            Source::Headers => &mut self.headers,
            Source::State => &mut self.state,
        };
        *slot = Some(rules);
        self
    }

    pub fn with_default_lang(mut self, lang: impl Into<String>) -> Self {
        self.default_lang = Some(lang.into());
        self
    }
}

/// Build a source table, dropping field entries that are not maps.
///
/// A source value that is not a map at all is treated as unconfigured.
fn lenient_source<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<SourceRules>, D::Error> {
    let fields = match Option::<Value>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Value::Object(fields)) => fields,
        Some(other) => {
            warn!(value = %other, "Ignoring source overrides that are not a map");
            return Ok(None);
        }
    };

    let rules = fields
        .into_iter()
        .filter_map(|(path, kinds)| match kinds {
            Value::Object(kinds) => Some((path, field_rules(kinds))),
            other => {
                warn!(path = %path, value = %other, "Ignoring field overrides that are not a map");
                None
            }
        })
        .collect();

    Ok(Some(rules))
}

fn field_rules(kinds: Map<String, Value>) -> FieldRules {
    kinds
        .into_iter()
        .map(|(kind, rule)| (kind, OverrideRule::from_value(rule)))
        .collect()
}

/// Find the rule for one issue.
///
/// Exact, case-sensitive, three-level lookup. No wildcards and no fallback
/// between field paths; a miss at any level returns `None`.
pub fn resolve<'a>(
    table: &'a RouteOverrides,
    source: Source,
    path: &str,
    kind: &str,
) -> Option<&'a OverrideRule> {
    table.messages_for(source)?.get(path)?.get(kind)
}
