//! Errors raised by import and export plugins.
//!
//! Every variant carries the path it was working on; plugin faults surface
//! to HTTP callers only as a generic server error, so the path is what makes
//! the server-side log line actionable.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// All errors returned by the plugins in this crate.
#[derive(Debug, Error)]
pub enum PluginError {
    /// A lookup table the plugin needs is not present on disk.
    #[error("Resource '{name}' not found at '{path}'")]
    MissingResource { name: &'static str, path: PathBuf },

    /// Input was read but does not describe a shipped item instance.
    #[error("Malformed input '{path}': {detail}")]
    Malformed { path: PathBuf, detail: String },

    /// Reading or writing a file failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document could not be rendered to JSON.
    #[error("Failed to serialise '{path}': {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PluginError {
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| PluginError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
