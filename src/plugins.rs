//! The set of plugins a conversion runs with.
//!
//! One importer, one exporter per package format. The output format picks
//! an exporter exactly once, in [`Plugins::exporter_for`]; native mode has
//! none and the orchestrator returns the normalized text instead.

use crate::config::ServiceConfig;
use crate::error::ConvertError;
use crate::pipeline::select::OutputFormat;
use adapt_plugins::{
    AdmExporter, Exporter, Importer, IsoExporter, Properties, ResourceLocations,
    ShippedItemInstanceImporter,
};
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Importer plus ISO and ADM exporters, cheap to clone and share.
#[derive(Clone)]
pub struct Plugins {
    importer: Arc<dyn Importer>,
    iso: Arc<dyn Exporter>,
    adm: Arc<dyn Exporter>,
}

impl Plugins {
    /// Assemble a set from arbitrary plugin implementations.
    pub fn new(importer: Arc<dyn Importer>, iso: Arc<dyn Exporter>, adm: Arc<dyn Exporter>) -> Self {
        Self { importer, iso, adm }
    }

    /// The bundled shipped-item-instance importer and ISO / ADM exporters.
    ///
    /// Fails when a lookup table is missing from `resources`.
    pub fn from_resources(resources: &ResourceLocations) -> Result<Self, ConvertError> {
        resources.validate()?;
        let plugins = Self::new(
            Arc::new(ShippedItemInstanceImporter::new(resources)?),
            Arc::new(IsoExporter::new(resources, Properties::default())?),
            Arc::new(AdmExporter::new()),
        );
        info!("Plugins ready: {:?}", plugins);
        Ok(plugins)
    }

    /// Bundled plugins with resources from `config.resources_dir`.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ConvertError> {
        Self::from_resources(&config.resource_locations())
    }

    pub fn importer(&self) -> &dyn Importer {
        self.importer.as_ref()
    }

    /// The exporter for `format`, or `None` for native passthrough.
    pub fn exporter_for(&self, format: OutputFormat) -> Option<&dyn Exporter> {
        match format {
            OutputFormat::Native => None,
            OutputFormat::Iso => Some(self.iso.as_ref()),
            OutputFormat::Adm => Some(self.adm.as_ref()),
        }
    }
}

impl fmt::Debug for Plugins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugins")
            .field("importer", &self.importer.name())
            .field("iso", &self.iso.name())
            .field("adm", &self.adm.name())
            .finish()
    }
}
