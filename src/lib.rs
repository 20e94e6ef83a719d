//! # sii-converter
//!
//! Convert shipped item instance (SII) JSON into the formats of the ADAPT
//! agricultural data framework: the normalized JSON itself, an ISO 11783-10
//! (ISO-XML) task data package, or an ADAPT ADM package.
//!
//! ## Pipeline Overview
//!
//! ```text
//! request (content-type + double-encoded JSON body)
//!  │
//!  ├─ 1. Select     content-type → native / iso / adm
//!  ├─ 2. Normalize  decode the JSON string, strip whitespace
//!  ├─ 3. Stage      write input.json into a per-request workspace
//!  ├─ 4. Import     SII plugin → canonical documents (exactly one allowed)
//!  ├─ 5. Export     ISO-XML or ADM plugin → output directory
//!  └─ 6. Package    deterministic zip of the output directory
//! ```
//!
//! Native requests stop after step 4 and return the normalized text.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sii_converter::{convert, ConversionRequest, ConversionResult, Plugins, ServiceConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServiceConfig::builder().resources_dir("Resources").build()?;
//!     let plugins = Plugins::from_config(&config)?;
//!
//!     let body = serde_json::to_vec(r#"{"id":"abc123","quantity":5}"#)?;
//!     let request = ConversionRequest::new(Some("application/vnd.aggateway.adapt.iso+zip"), body)?;
//!     if let ConversionResult::Archive(zip) = convert(request, &plugins, &config).await? {
//!         std::fs::write("taskdata.zip", zip)?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `sii-converter` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod plugins;
pub mod server;

#[cfg(test)]
mod testutil;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use adapt_plugins;
pub use config::{ServiceConfig, ServiceConfigBuilder};
pub use convert::{convert, convert_sync};
pub use error::ConvertError;
pub use output::{ConversionRequest, ConversionResult};
pub use pipeline::select::OutputFormat;
pub use plugins::Plugins;
pub use server::{serve, serve_on, AppContext};
