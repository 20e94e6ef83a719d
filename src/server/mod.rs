//! HTTP surface of the converter.
//!
//! One conversion endpoint, `/api/Converter`, accepting GET and POST, plus
//! two unauthenticated ones: the `/api/health` probe and the OpenAPI
//! description at `/api/openapi.json`. Handlers are thin: they turn headers
//! and body into a [`ConversionRequest`](crate::ConversionRequest), call
//! [`crate::convert`], and map the result or error onto a response.

pub mod auth;
pub mod endpoints;
pub mod error;
pub mod openapi;
pub mod router;

use crate::config::ServiceConfig;
use crate::error::ConvertError;
use crate::plugins::Plugins;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Shared state handed to every handler and middleware.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Arc<ServiceConfig>,
    pub plugins: Plugins,
}

impl AppContext {
    pub fn new(config: ServiceConfig, plugins: Plugins) -> Self {
        Self {
            config: Arc::new(config),
            plugins,
        }
    }
}

/// Bind `config.bind_addr` and serve until ctrl-c.
pub async fn serve(config: ServiceConfig, plugins: Plugins) -> Result<(), ConvertError> {
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(ConvertError::Server)?;
    serve_on(listener, AppContext::new(config, plugins), shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// In-flight requests finish before this returns.
pub async fn serve_on(
    listener: TcpListener,
    ctx: AppContext,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ConvertError> {
    let addr = listener.local_addr().map_err(ConvertError::Server)?;
    info!("Listening on http://{}/api/Converter", addr);
    axum::serve(listener, router::build_router(ctx))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ConvertError::Server)?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available: run until the process is killed.
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
