//! Shipped item instance importer: native JSON files → canonical documents.
//!
//! Every `*.json` file directly inside the import directory is read, in
//! file-name order. A file may hold a single shipped item instance object,
//! a JSON array of them, or an envelope object whose `shippedItemInstance`
//! member is such an array.

use crate::error::PluginError;
use crate::model::CanonicalDocument;
use crate::plugin::Importer;
use crate::resources::ResourceLocations;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Envelope member holding a batch of instances.
pub const BATCH_KEY: &str = "shippedItemInstance";

/// Importer for the native shipped item instance JSON format.
#[derive(Debug, Clone)]
pub struct ShippedItemInstanceImporter;

impl ShippedItemInstanceImporter {
    /// Create the importer, checking the unit tables it resolves against.
    pub fn new(resources: &ResourceLocations) -> Result<Self, PluginError> {
        resources.ensure_import_tables()?;
        Ok(Self)
    }
}

impl Importer for ShippedItemInstanceImporter {
    fn name(&self) -> &'static str {
        "shipped-item-instance"
    }

    fn import(&self, dir: &Path) -> Result<Vec<CanonicalDocument>, PluginError> {
        let mut documents = Vec::new();
        for path in json_files(dir)? {
            let text = fs::read_to_string(&path).map_err(PluginError::io(&path))?;
            let value: Value = serde_json::from_str(&text).map_err(|e| PluginError::Malformed {
                path: path.clone(),
                detail: e.to_string(),
            })?;

            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "document".to_string());

            let items = unwrap_batch(value);
            debug!("{}: {} instance(s)", path.display(), items.len());
            for (index, item) in items.into_iter().enumerate() {
                let doc = CanonicalDocument::from_value(item, format!("{stem}-{index}")).ok_or_else(
                    || PluginError::Malformed {
                        path: path.clone(),
                        detail: format!("entry {index} is not a JSON object"),
                    },
                )?;
                documents.push(doc);
            }
        }
        Ok(documents)
    }
}

/// `*.json` files directly inside `dir`, sorted by name.
fn json_files(dir: &Path) -> Result<Vec<PathBuf>, PluginError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(PluginError::io(dir))? {
        let path = entry.map_err(PluginError::io(dir))?.path();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn unwrap_batch(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(BATCH_KEY) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                map.insert(BATCH_KEY.to_string(), other);
                vec![Value::Object(map)]
            }
            None => vec![Value::Object(map)],
        },
        other => vec![other],
    }
}
