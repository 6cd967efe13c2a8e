//! Message rewriting: apply a route's override rules to a validation failure.

use crate::failure::ValidationFailure;
use crate::i18n::{negotiate, NegotiationContext};
use crate::interpolate::interpolate;
use crate::overrides::{resolve, OverrideRule, RouteOverrides};
use tracing::{debug, warn};

/// Result of running the rewriter over one failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// The route has no rules for the failure's source; nothing was touched.
    PassThrough,

    /// Rules were applied. `rewritten` counts issues whose message changed hands.
    Rewritten { rewritten: usize },
}

/// Rewrite issue messages of `failure` in place.
///
/// Issues keep their order, path, kind and context. Issues without a usable
/// rule keep their original message. After processing, the aggregate message
/// is set to the first issue's message.
pub fn rewrite(
    failure: &mut ValidationFailure,
    table: &RouteOverrides,
    negotiation: &NegotiationContext,
) -> RewriteOutcome {
    if table.messages_for(failure.source).is_none() {
        return RewriteOutcome::PassThrough;
    }

    let source = failure.source;
    let mut rewritten = 0;

    for issue in failure.issues.iter_mut() {
        let Some(rule) = resolve(table, source, &issue.path, &issue.kind) else {
            continue;
        };

        let template = match rule {
            OverrideRule::Text(template) => Some(template),
            OverrideRule::Localized(templates) => {
                let lang = negotiate(
                    &negotiation.preferences,
                    templates.keys(),
                    &negotiation.default_lang,
                );
                debug!(path = %issue.path, kind = %issue.kind, lang, "Negotiated message language");
                templates.get(lang)
            }
            OverrideRule::Unsupported(_) => {
                warn!(
                    source = %source,
                    path = %issue.path,
                    kind = %issue.kind,
                    "Unsupported override rule shape, leaving message unchanged"
                );
                None
            }
        };

        // Empty templates count as no rule
        if let Some(template) = template.filter(|template| !template.is_empty()) {
            issue.message = interpolate(template, issue.context.as_ref());
            rewritten += 1;
            debug!(path = %issue.path, kind = %issue.kind, "Rewrote validation message");
        }
    }

    if let Some(first) = failure.issues.first() {
        failure.message = first.message.clone();
    }

    RewriteOutcome::Rewritten { rewritten }
}
