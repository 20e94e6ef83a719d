//! HTTP error responses.
//!
//! Bodies are plain text. Client errors echo the reason; server faults are
//! logged with full detail and answered with a generic message.

use crate::error::ConvertError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Authentication required".to_string(),
            ),
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::Internal(detail) => {
                error!(detail = %detail, "Conversion failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };
        (status, message).into_response()
    }
}

impl From<ConvertError> for ApiError {
    fn from(err: ConvertError) -> Self {
        if err.is_client_error() {
            warn!("Rejected request: {}", err);
            ApiError::BadRequest(err.to_string())
        } else {
            ApiError::Internal(error_chain(&err))
        }
    }
}

/// `err` followed by each of its sources, joined with ": ".
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !out.contains(&cause_text) {
            out.push_str(": ");
            out.push_str(&cause_text);
        }
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn client_errors_are_bad_requests_with_reason() {
        let api: ApiError = ConvertError::MissingContentType.into();
        let response = api.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("content-type"));
    }

    #[tokio::test]
    async fn server_faults_hide_detail() {
        let api: ApiError = ConvertError::Internal("secret path /srv/x".into()).into();
        let response = api.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let text = body_text(response).await;
        assert!(!text.contains("/srv/x"), "{text}");
    }

    #[test]
    fn unauthorized_maps_to_401() {
        assert_eq!(
            ApiError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn error_chain_includes_sources_once() {
        let err = ConvertError::workspace("write", "/tmp/w")(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        ));
        let chain = error_chain(&err);
        assert_eq!(chain.matches("disk full").count(), 1, "{chain}");
    }
}
