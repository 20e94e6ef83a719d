//! Route table and middleware stack.
//!
//! Layers, outermost first:
//! 1. Trace (one span per request, tagged with a fresh id)
//! 2. Body limit (413 past `max_body_bytes`)
//! 3. Function key (conversion route only)

use super::{auth, endpoints, AppContext};
use axum::extract::{DefaultBodyLimit, Request};
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Build the service router.
pub fn build_router(ctx: AppContext) -> Router {
    let api = Router::new()
        .route("/Converter", get(endpoints::convert).post(endpoints::convert))
        .route_layer(middleware::from_fn_with_state(
            ctx.clone(),
            auth::require_function_key,
        ))
        // Added after the route layer so these skip the key check.
        .route("/health", get(endpoints::health))
        .route("/openapi.json", get(endpoints::openapi_document));

    Router::new()
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(ctx.config.max_body_bytes))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request| {
                tracing::info_span!(
                    "request",
                    id = %Uuid::new_v4(),
                    method = %req.method(),
                    uri = %req.uri().path(),
                )
            }),
        )
        .with_state(ctx)
}
