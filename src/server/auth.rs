//! Function key check.
//!
//! When [`ServiceConfig::function_key`](crate::ServiceConfig) is set, the
//! conversion endpoint requires the same value in the `code` query
//! parameter. The comparison is constant-time.

use super::error::ApiError;
use super::AppContext;
use axum::extract::{Query, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use subtle::ConstantTimeEq;

#[derive(Debug, Deserialize)]
pub struct KeyQuery {
    code: Option<String>,
}

/// Reject requests whose `code` does not match the configured key.
///
/// Without a configured key the query string is not looked at. With one,
/// a query that does not parse counts as a missing `code`.
pub async fn require_function_key(
    State(ctx): State<AppContext>,
    req: Request,
    next: Next,
) -> Response {
    let Some(expected) = ctx.config.function_key.as_deref() else {
        return next.run(req).await;
    };
    let supplied = Query::<KeyQuery>::try_from_uri(req.uri())
        .ok()
        .and_then(|Query(query)| query.code);
    if key_matches(expected, supplied.as_deref()) {
        next.run(req).await
    } else {
        ApiError::Unauthorized.into_response()
    }
}

fn key_matches(expected: &str, supplied: Option<&str>) -> bool {
    supplied.is_some_and(|code| bool::from(code.as_bytes().ct_eq(expected.as_bytes())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_must_match_exactly() {
        assert!(key_matches("s3cret", Some("s3cret")));
        assert!(!key_matches("s3cret", Some("s3cre")));
        assert!(!key_matches("s3cret", Some("S3CRET")));
        assert!(!key_matches("s3cret", None));
    }
}
