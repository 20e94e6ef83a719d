//! Request handlers.

use super::error::ApiError;
use super::{openapi, AppContext};
use crate::output::ConversionRequest;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

/// `GET|POST /api/Converter`: convert the body per its `content-type`.
pub async fn convert(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let content_type = content_type(&headers);
    let request = ConversionRequest::new(content_type.as_deref(), body.to_vec())?;
    let result = crate::convert::convert(request, &ctx.plugins, &ctx.config).await?;
    let media_type = result.media_type();
    Ok(([(header::CONTENT_TYPE, media_type)], result.into_bytes()).into_response())
}

/// `GET /api/health`
pub async fn health() -> &'static str {
    "ok"
}

/// `GET /api/openapi.json`
pub async fn openapi_document(State(ctx): State<AppContext>) -> Json<Value> {
    Json(openapi::document(ctx.config.function_key.is_some()))
}

/// Every `content-type` value, joined with commas. `None` when absent.
///
/// Bytes outside visible ASCII are decoded lossily; such a value never
/// matches a package media type and falls through to native.
fn content_type(headers: &HeaderMap) -> Option<String> {
    let values: Vec<_> = headers
        .get_all(header::CONTENT_TYPE)
        .iter()
        .map(|v| String::from_utf8_lossy(v.as_bytes()))
        .collect();
    (!values.is_empty()).then(|| values.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn absent_header_is_none() {
        assert_eq!(content_type(&HeaderMap::new()), None);
    }

    #[test]
    fn repeated_headers_are_joined() {
        let mut headers = HeaderMap::new();
        headers.append(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        headers.append(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/vnd.aggateway.adapt.adm+zip"),
        );
        assert_eq!(
            content_type(&headers).as_deref(),
            Some("text/plain,application/vnd.aggateway.adapt.adm+zip")
        );
    }

    #[test]
    fn opaque_header_bytes_are_kept() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_bytes(b"text/pl\xe4in").unwrap(),
        );
        assert_eq!(content_type(&headers).as_deref(), Some("text/pl\u{fffd}in"));
    }
}
