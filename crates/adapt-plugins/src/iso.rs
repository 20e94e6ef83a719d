//! ISO 11783-10 exporter: writes a minimal `TASKDATA/TASKDATA.XML`.
//!
//! The document becomes one product (`PDT`) whose `G` attribute carries the
//! quantity value. When the quantity carries a unit code a value
//! presentation (`VPN`) is emitted for it and referenced from the product. Attribute order is fixed and nothing time dependent is
//! written, so identical documents produce identical files.

use crate::error::PluginError;
use crate::model::CanonicalDocument;
use crate::plugin::{Exporter, Properties};
use crate::resources::ResourceLocations;
use std::borrow::Cow;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const TASKDATA_DIR: &str = "TASKDATA";
pub const TASKDATA_FILE: &str = "TASKDATA.XML";

const DEFAULT_MANUFACTURER: &str = "AgGateway ADAPT";
const DEFAULT_SOFTWARE_VERSION: &str = env!("CARGO_PKG_VERSION");
/// 1 = FMIS, 2 = MICS.
const DEFAULT_TRANSFER_ORIGIN: &str = "1";

/// Exporter for the ISO-XML task data format.
#[derive(Debug, Clone)]
pub struct IsoExporter {
    properties: Properties,
}

impl IsoExporter {
    /// Create the exporter, checking the DDI and unit tables it relies on.
    ///
    /// Recognised properties: `ManagementSoftwareManufacturer`,
    /// `ManagementSoftwareVersion`, `DataTransferOrigin`.
    pub fn new(resources: &ResourceLocations, properties: Properties) -> Result<Self, PluginError> {
        resources.ensure_iso_tables()?;
        if !properties.is_empty() {
            debug!("ISO-XML header overrides: {:?}", properties);
        }
        Ok(Self { properties })
    }

    fn property<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.properties.get(key).unwrap_or(default)
    }

    /// Render the task data document.
    pub fn render(&self, document: &CanonicalDocument) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(
            xml,
            "<ISO11783_TaskData VersionMajor=\"4\" VersionMinor=\"3\" \
             ManagementSoftwareManufacturer=\"{}\" ManagementSoftwareVersion=\"{}\" \
             DataTransferOrigin=\"{}\">",
            escape(self.property("ManagementSoftwareManufacturer", DEFAULT_MANUFACTURER)),
            escape(self.property("ManagementSoftwareVersion", DEFAULT_SOFTWARE_VERSION)),
            escape(self.property("DataTransferOrigin", DEFAULT_TRANSFER_ORIGIN)),
        );

        let unit = document
            .quantity
            .as_ref()
            .and_then(|q| q.unit_code.as_deref());
        if let Some(unit) = unit {
            // offset 0, scale 1, 0 decimals
            let _ = writeln!(
                xml,
                "<VPN A=\"VPN1\" B=\"0\" C=\"1.0\" D=\"0\" E=\"{}\"/>",
                escape(unit)
            );
        }

        let _ = write!(xml, "<PDT A=\"PDT1\" B=\"{}\"", escape(document.designator()));
        if unit.is_some() {
            xml.push_str(" D=\"VPN1\"");
        }
        xml.push_str(" F=\"1\"");
        if let Some(quantity) = &document.quantity {
            let _ = write!(xml, " G=\"{}\"", quantity.value);
        }
        xml.push_str("/>\n");

        xml.push_str("</ISO11783_TaskData>\n");
        xml
    }
}

impl Exporter for IsoExporter {
    fn name(&self) -> &'static str {
        "iso-xml"
    }

    fn export(&self, document: &CanonicalDocument, output_dir: &Path) -> Result<(), PluginError> {
        let dir = output_dir.join(TASKDATA_DIR);
        fs::create_dir_all(&dir).map_err(PluginError::io(&dir))?;

        let path = dir.join(TASKDATA_FILE);
        fs::write(&path, self.render(document)).map_err(PluginError::io(&path))?;
        debug!("Wrote {}", path.display());
        Ok(())
    }
}

/// Escape the five XML special characters for use inside attribute values.
fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}
