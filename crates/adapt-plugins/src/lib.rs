//! # adapt-plugins
//!
//! The codec side of the shipped-item-instance converter: a format-agnostic
//! [`CanonicalDocument`] plus the plugins that move data in and out of it.
//!
//! ```text
//!  *.json ──▶ ShippedItemInstanceImporter ──▶ CanonicalDocument
//!                                                  │
//!                          ┌───────────────────────┴──────────────┐
//!                          ▼                                      ▼
//!                    IsoExporter                             AdmExporter
//!              TASKDATA/TASKDATA.XML                 adm/Catalog.adm, adm/Documents/…
//! ```
//!
//! Plugins are plain trait objects ([`Importer`], [`Exporter`]) so the
//! conversion pipeline never knows which codec it is driving. Lookup tables
//! the codecs depend on are located through [`ResourceLocations`], handed to
//! each plugin when it is constructed.
//!
//! The exporters shipped here write a deliberately small subset of each
//! format: enough structure for downstream tooling to recognise the package,
//! with byte-identical output for identical input.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod adm;
pub mod error;
pub mod iso;
pub mod model;
pub mod plugin;
pub mod resources;
pub mod sii;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use adm::AdmExporter;
pub use error::PluginError;
pub use iso::IsoExporter;
pub use model::{CanonicalDocument, Quantity};
pub use plugin::{Exporter, Importer, Properties};
pub use resources::ResourceLocations;
pub use sii::ShippedItemInstanceImporter;
