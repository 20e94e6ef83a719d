//! Shared fixtures for unit tests.

use crate::plugins::Plugins;
use adapt_plugins::resources::{
    ResourceLocations, DDI_DATA_FILE, ISO_UNIT_OF_MEASURE_FILE, REPRESENTATION_SYSTEM_FILE,
    UNIT_SYSTEM_FILE,
};
use adapt_plugins::{
    AdmExporter, CanonicalDocument, Exporter, Importer, IsoExporter, PluginError, Properties,
    ShippedItemInstanceImporter,
};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// A resources directory holding empty placeholder lookup tables.
pub fn resources_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in [
        UNIT_SYSTEM_FILE,
        REPRESENTATION_SYSTEM_FILE,
        DDI_DATA_FILE,
        ISO_UNIT_OF_MEASURE_FILE,
    ] {
        std::fs::write(dir.path().join(name), b"").unwrap();
    }
    dir
}

/// The bundled plugins over placeholder resources. Keep the guard alive.
pub fn bundled_plugins() -> (TempDir, Plugins) {
    let dir = resources_dir();
    let plugins = Plugins::from_resources(&ResourceLocations::from_base(dir.path())).unwrap();
    (dir, plugins)
}

/// Double-encode a payload the way clients do.
pub fn encoded_body(payload: &str) -> Vec<u8> {
    serde_json::to_vec(payload).unwrap()
}

/// Importer that returns `n` documents regardless of input.
pub struct FixedCountImporter(pub usize);

impl Importer for FixedCountImporter {
    fn name(&self) -> &'static str {
        "fixed-count"
    }

    fn import(&self, _dir: &Path) -> Result<Vec<CanonicalDocument>, PluginError> {
        Ok((0..self.0)
            .map(|i| {
                CanonicalDocument::from_value(serde_json::json!({ "id": i }), "fixed").unwrap()
            })
            .collect())
    }
}

/// Exporter that always fails.
pub struct FailingExporter;

impl Exporter for FailingExporter {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn export(&self, _document: &CanonicalDocument, output_dir: &Path) -> Result<(), PluginError> {
        Err(PluginError::Malformed {
            path: output_dir.to_path_buf(),
            detail: "refusing to export".into(),
        })
    }
}

/// Bundled exporters with the importer replaced.
pub fn plugins_with_importer(importer: impl Importer + 'static) -> (TempDir, Plugins) {
    let dir = resources_dir();
    let resources = ResourceLocations::from_base(dir.path());
    let plugins = Plugins::new(
        Arc::new(importer),
        Arc::new(IsoExporter::new(&resources, Properties::default()).unwrap()),
        Arc::new(AdmExporter::new()),
    );
    (dir, plugins)
}

/// Bundled importer with both exporters failing.
pub fn plugins_with_failing_exporters() -> (TempDir, Plugins) {
    let dir = resources_dir();
    let importer =
        ShippedItemInstanceImporter::new(&ResourceLocations::from_base(dir.path())).unwrap();
    let plugins = Plugins::new(
        Arc::new(importer),
        Arc::new(FailingExporter),
        Arc::new(FailingExporter),
    );
    (dir, plugins)
}
