//! Plugin seams: one trait for reading documents, one for writing them.
//!
//! Both traits are object safe and `Send + Sync`; the HTTP service shares a
//! single instance of each plugin across concurrent requests. Neither trait
//! hands bytes back to the caller. Importers read from a directory and
//! exporters write into one, which keeps packaging (zip) a separate,
//! format-agnostic step.

use crate::error::PluginError;
use crate::model::CanonicalDocument;
use std::collections::BTreeMap;
use std::path::Path;

/// Reads every document found in a directory.
pub trait Importer: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Parse every supported file in `dir`.
    ///
    /// Returns all documents found, possibly none. Deciding how many
    /// documents are acceptable is the caller's business.
    fn import(&self, dir: &Path) -> Result<Vec<CanonicalDocument>, PluginError>;
}

/// Writes one document as files under an output directory.
pub trait Exporter: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Serialise `document` into `output_dir`, which already exists.
    fn export(&self, document: &CanonicalDocument, output_dir: &Path) -> Result<(), PluginError>;
}

/// Free-form key/value settings passed to an exporter.
///
/// Ordered so that anything derived from it is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties(BTreeMap<String, String>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
