//! Demo HTTP surface.
//!
//! `GET /items/:id?limit=N` validates its path and query, and sends any
//! failure through the route's `FailureHandler`.

use crate::config::Config;
use crate::fail_action::{FailAction, FailureHandler, Options};
use crate::failure::{Source, ValidationFailure, ValidationIssue};
use crate::overrides::RouteOverrides;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use regex::Regex;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tower_http::trace::TraceLayer;

/// Route path, also the key used for this route in the overrides file.
pub const ITEM_ROUTE: &str = "/items/:id";

const ID_PATTERN: &str = "^[a-z][a-z0-9-]*$";
const MAX_LIMIT: i64 = 100;

static ID_REGEX: OnceLock<Regex> = OnceLock::new();

#[derive(Clone)]
struct ItemRoute {
    failure: FailureHandler,
}

/// Router configured from the environment-derived config.
pub fn router(config: &Config) -> Router {
    build_router(&config.options(), config.overrides_for(ITEM_ROUTE), None)
}

/// Router with explicit overrides and an optional previously installed failure action.
pub fn build_router(
    options: &Options,
    overrides: RouteOverrides,
    original: Option<Arc<dyn FailAction>>,
) -> Router {
    let state = ItemRoute {
        failure: FailureHandler::register(options, overrides, original),
    };

    Router::new()
        .route(ITEM_ROUTE, get(get_item))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn get_item(
    State(route): State<ItemRoute>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Err(failure) = validate_params(&id) {
        return route.failure.handle(&headers, failure);
    }

    let limit = match validate_query(&query) {
        Ok(limit) => limit,
        Err(failure) => return route.failure.handle(&headers, failure),
    };

    Json(json!({ "id": id, "limit": limit })).into_response()
}

fn validate_params(id: &str) -> Result<(), ValidationFailure> {
    let regex = ID_REGEX.get_or_init(|| Regex::new(ID_PATTERN).expect("valid id pattern"));
    if regex.is_match(id) {
        return Ok(());
    }

    let message = format!(
        "\"id\" with value \"{}\" fails to match the required pattern: /{}/",
        id, ID_PATTERN
    );
    let issue = ValidationIssue::new("id", "string.regex.base", message)
        .with_context("key", "id")
        .with_context("value", id)
        .with_context("pattern", ID_PATTERN);

    Err(single_issue_failure(Source::Params, issue, id))
}

fn validate_query(query: &HashMap<String, String>) -> Result<Option<i64>, ValidationFailure> {
    let Some(raw) = query.get("limit") else {
        return Ok(None);
    };

    let issue = match raw.parse::<i64>() {
        Ok(limit) if limit <= MAX_LIMIT => return Ok(Some(limit)),
        Ok(_) => ValidationIssue::new(
            "limit",
            "number.max",
            format!("\"limit\" must be less than or equal to {}", MAX_LIMIT),
        )
        .with_context("limit", MAX_LIMIT),
        Err(_) => ValidationIssue::new("limit", "number.base", "\"limit\" must be a number"),
    };

    let issue = issue.with_context("key", "limit").with_context("value", raw.as_str());
    Err(single_issue_failure(Source::Query, issue, raw))
}

fn single_issue_failure(source: Source, issue: ValidationIssue, value: &str) -> ValidationFailure {
    let aggregate = format!("child \"{}\" fails because [{}]", issue.path, issue.message);
    let mut object = serde_json::Map::new();
    object.insert(issue.path.clone(), json!(value));

    let mut failure = ValidationFailure::new(source, aggregate, vec![issue]);
    failure.extra.insert("_object".to_string(), object.into());
    failure
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_id() {
        assert!(validate_params("chicken-42").is_ok());
    }

    #[test]
    fn test_invalid_id_failure_shape() {
        let failure = validate_params("10").unwrap_err();
        assert_eq!(failure.source, Source::Params);
        assert_eq!(failure.issues[0].path, "id");
        assert_eq!(failure.issues[0].kind, "string.regex.base");
        assert!(failure.message.starts_with("child \"id\" fails because"));
        assert_eq!(failure.extra["_object"], json!({ "id": "10" }));
    }

    #[test]
    fn test_query_limit() {
        let mut query = HashMap::new();
        assert_eq!(validate_query(&query).unwrap(), None);

        query.insert("limit".to_string(), "5".to_string());
        assert_eq!(validate_query(&query).unwrap(), Some(5));

        query.insert("limit".to_string(), "500".to_string());
        let failure = validate_query(&query).unwrap_err();
        assert_eq!(failure.source, Source::Query);
        assert_eq!(failure.issues[0].kind, "number.max");

        query.insert("limit".to_string(), "lots".to_string());
        assert_eq!(validate_query(&query).unwrap_err().issues[0].kind, "number.base");
    }
}
