//! Error type for the sii-converter library.
//!
//! [`ConvertError`] covers every way a conversion can stop. Variants fall
//! into two classes, reported by [`ConvertError::is_client_error`]:
//!
//! * **Client errors**: the request itself is unusable (no content-type,
//!   body is not JSON, the payload does not resolve to exactly one
//!   document). Nothing is exported; HTTP callers get a 400.
//!
//! * **Server faults**: a plugin, the working storage, or packaging
//!   failed while handling an acceptable request. HTTP callers get a 500
//!   and the detail stays in the server log.
//!
//! No variant is retried anywhere in the pipeline.

use adapt_plugins::PluginError;
use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the sii-converter library.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Request errors ────────────────────────────────────────────────────
    /// The request carried no `content-type` header.
    #[error("Missing content-type header")]
    MissingContentType,

    /// The body is not JSON.
    #[error("Request body is not valid JSON: {0}")]
    InvalidBody(#[source] serde_json::Error),

    /// The body is JSON, but not a string or a document.
    #[error("Request body must be a JSON string or document, got {kind}")]
    UnsupportedBody { kind: &'static str },

    /// Import produced zero or several documents.
    #[error("Expected exactly one document, import produced {count}")]
    UnsupportedCardinality { count: usize },

    // ── Plugin errors ─────────────────────────────────────────────────────
    /// A plugin could not be constructed (usually a missing resource file).
    #[error("Plugin setup failed: {0}")]
    PluginSetup(#[from] PluginError),

    /// The importer failed.
    #[error("Import with '{plugin}' failed: {source}")]
    Import {
        plugin: &'static str,
        #[source]
        source: PluginError,
    },

    /// The exporter failed.
    #[error("Export with '{plugin}' failed: {source}")]
    Export {
        plugin: &'static str,
        #[source]
        source: PluginError,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Creating, writing, reading or deleting working storage failed.
    #[error("Working storage error ({action}) on '{path}': {source}")]
    Workspace {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Zipping the export output failed.
    #[error("Failed to package '{path}': {source}")]
    Package {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Binding or running the HTTP server failed.
    #[error("HTTP server error: {0}")]
    Server(#[source] std::io::Error),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConvertError {
    /// `true` when the caller sent an unusable request (HTTP 400).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ConvertError::MissingContentType
                | ConvertError::InvalidBody(_)
                | ConvertError::UnsupportedBody { .. }
                | ConvertError::UnsupportedCardinality { .. }
        )
    }

    pub(crate) fn workspace(
        action: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| ConvertError::Workspace {
            action,
            path,
            source,
        }
    }
}
