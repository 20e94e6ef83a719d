//! Locations of the lookup tables the codecs depend on.
//!
//! The importer resolves units against the unit and representation
//! systems; the ISO exporter needs the DDI dictionary and the ISO unit of
//! measure list. All four live side by side in one resources directory
//! that is resolved once at startup and handed to each plugin constructor.

use crate::error::PluginError;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const UNIT_SYSTEM_FILE: &str = "UnitSystem.xml";
pub const REPRESENTATION_SYSTEM_FILE: &str = "RepresentationSystem.xml";
pub const DDI_DATA_FILE: &str = "ddiExport.txt";
pub const ISO_UNIT_OF_MEASURE_FILE: &str = "IsoUnitOfMeasure.xml";

/// Absolute or relative paths of every lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocations {
    pub unit_system: PathBuf,
    pub representation_system: PathBuf,
    pub ddi_data: PathBuf,
    pub iso_unit_of_measure: PathBuf,
}

impl ResourceLocations {
    /// Resolve the standard file names inside `base`.
    pub fn from_base(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            unit_system: base.join(UNIT_SYSTEM_FILE),
            representation_system: base.join(REPRESENTATION_SYSTEM_FILE),
            ddi_data: base.join(DDI_DATA_FILE),
            iso_unit_of_measure: base.join(ISO_UNIT_OF_MEASURE_FILE),
        }
    }

    /// Tables needed to import native documents.
    pub fn ensure_import_tables(&self) -> Result<(), PluginError> {
        ensure_file(UNIT_SYSTEM_FILE, &self.unit_system)?;
        ensure_file(REPRESENTATION_SYSTEM_FILE, &self.representation_system)
    }

    /// Tables needed to write ISO-XML.
    pub fn ensure_iso_tables(&self) -> Result<(), PluginError> {
        ensure_file(DDI_DATA_FILE, &self.ddi_data)?;
        ensure_file(ISO_UNIT_OF_MEASURE_FILE, &self.iso_unit_of_measure)
    }

    /// Check every table at once.
    pub fn validate(&self) -> Result<(), PluginError> {
        self.ensure_import_tables()?;
        self.ensure_iso_tables()
    }
}

fn ensure_file(name: &'static str, path: &Path) -> Result<(), PluginError> {
    if path.is_file() {
        debug!("Resource {} found at {}", name, path.display());
        Ok(())
    } else {
        Err(PluginError::MissingResource {
            name,
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch_all(dir: &Path) {
        for name in [
            UNIT_SYSTEM_FILE,
            REPRESENTATION_SYSTEM_FILE,
            DDI_DATA_FILE,
            ISO_UNIT_OF_MEASURE_FILE,
        ] {
            std::fs::write(dir.join(name), b"").unwrap();
        }
    }

    #[test]
    fn from_base_joins_standard_names() {
        let loc = ResourceLocations::from_base("/srv/Resources");
        assert_eq!(loc.unit_system, PathBuf::from("/srv/Resources/UnitSystem.xml"));
        assert_eq!(loc.ddi_data, PathBuf::from("/srv/Resources/ddiExport.txt"));
    }

    #[test]
    fn validate_passes_when_all_present() {
        let dir = tempfile::tempdir().unwrap();
        touch_all(dir.path());
        ResourceLocations::from_base(dir.path()).validate().unwrap();
    }

    #[test]
    fn missing_iso_table_is_reported_by_name() {
        let dir = tempfile::tempdir().unwrap();
        touch_all(dir.path());
        std::fs::remove_file(dir.path().join(DDI_DATA_FILE)).unwrap();

        let loc = ResourceLocations::from_base(dir.path());
        loc.ensure_import_tables().unwrap();
        match loc.ensure_iso_tables() {
            Err(PluginError::MissingResource { name, .. }) => assert_eq!(name, DDI_DATA_FILE),
            other => panic!("expected MissingResource, got {other:?}"),
        }
    }
}
