//! ADM exporter: writes the document as an ADAPT ADM directory.
//!
//! Layout under the output directory:
//!
//! ```text
//! adm/
//!  ├─ Version.json          format and plugin version
//!  ├─ Catalog.adm           product entries (id + description)
//!  └─ Documents/<id>.adm    the full canonical document
//! ```
//!
//! All files are pretty-printed JSON with sorted keys.

use crate::error::PluginError;
use crate::model::CanonicalDocument;
use crate::plugin::Exporter;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const ADM_DIR: &str = "adm";
pub const DOCUMENTS_DIR: &str = "Documents";
pub const CATALOG_FILE: &str = "Catalog.adm";
pub const VERSION_FILE: &str = "Version.json";

const ADM_FORMAT_VERSION: &str = "2.0";

/// Exporter for the ADAPT ADM format. Takes no configuration.
#[derive(Debug, Clone, Default)]
pub struct AdmExporter;

impl AdmExporter {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Version {
    adm_version: &'static str,
    plugin_version: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Catalog<'a> {
    products: Vec<CatalogProduct<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CatalogProduct<'a> {
    id: &'a str,
    description: &'a str,
    document: String,
}

impl Exporter for AdmExporter {
    fn name(&self) -> &'static str {
        "adm"
    }

    fn export(&self, document: &CanonicalDocument, output_dir: &Path) -> Result<(), PluginError> {
        let root = output_dir.join(ADM_DIR);
        let documents = root.join(DOCUMENTS_DIR);
        fs::create_dir_all(&documents).map_err(PluginError::io(&documents))?;

        let document_file = format!("{}.adm", file_stem(&document.id));

        write_json(
            &root.join(VERSION_FILE),
            &Version {
                adm_version: ADM_FORMAT_VERSION,
                plugin_version: env!("CARGO_PKG_VERSION"),
            },
        )?;
        write_json(
            &root.join(CATALOG_FILE),
            &Catalog {
                products: vec![CatalogProduct {
                    id: &document.id,
                    description: document.designator(),
                    document: format!("{DOCUMENTS_DIR}/{document_file}"),
                }],
            },
        )?;
        write_json(&documents.join(&document_file), document)?;

        debug!("Wrote ADM package under {}", root.display());
        Ok(())
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PluginError> {
    let mut text = serde_json::to_string_pretty(value).map_err(|source| PluginError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    text.push('\n');
    fs::write(path, text).map_err(PluginError::io(path))
}

/// Reduce an identifier to a safe file stem.
fn file_stem(id: &str) -> String {
    let stem: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "document".to_string()
    } else {
        stem
    }
}
