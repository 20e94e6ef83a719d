//! Conversion entry points: the pipeline orchestrator.
//!
//! ```text
//! ConversionRequest ─▶ normalize ─▶ stage ─▶ import ─▶ exactly one? ─┬─ native ─▶ Passthrough
//!                                                                    └─ iso/adm ─▶ export ─▶ zip ─▶ Archive
//! ```
//!
//! The walk is linear: every step runs once, the first error ends the
//! conversion, nothing is retried and no partial output is returned.
//! Everything after normalisation touches the file system or runs plugin
//! code, so it runs on the blocking thread pool.

use crate::config::ServiceConfig;
use crate::error::ConvertError;
use crate::output::{ConversionRequest, ConversionResult};
use crate::pipeline::normalize;
use crate::pipeline::package;
use crate::pipeline::select::OutputFormat;
use crate::pipeline::workspace::Workspace;
use crate::plugins::Plugins;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Convert one request.
///
/// # Returns
/// [`ConversionResult::Passthrough`] for native requests,
/// [`ConversionResult::Archive`] for ISO and ADM requests.
///
/// # Errors
/// Client errors (see [`ConvertError::is_client_error`]) for bodies that
/// are not JSON and payloads that do not hold exactly one document; server
/// faults for plugin and working-storage failures.
pub async fn convert(
    request: ConversionRequest,
    plugins: &Plugins,
    config: &ServiceConfig,
) -> Result<ConversionResult, ConvertError> {
    let start = Instant::now();
    let format = request.format();
    info!("Starting {} conversion ({} byte body)", format, request.body().len());

    let normalized = normalize::normalize_body(request.body())?;
    debug!("Normalized payload: {} bytes", normalized.len());

    let plugins = plugins.clone();
    let work_root = config.work_root.clone();
    let result = tokio::task::spawn_blocking(move || {
        convert_normalized(normalized, format, &plugins, work_root.as_deref())
    })
    .await
    .map_err(|e| ConvertError::Internal(format!("Conversion task panicked: {}", e)))??;

    info!(
        "Conversion complete: {} → {} bytes in {}ms",
        format,
        result.len(),
        start.elapsed().as_millis()
    );
    Ok(result)
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    request: ConversionRequest,
    plugins: &Plugins,
    config: &ServiceConfig,
) -> Result<ConversionResult, ConvertError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ConvertError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(request, plugins, config))
}

/// Stage, import, and (for package formats) export and zip.
///
/// Blocking. The workspace is removed when this returns.
fn convert_normalized(
    normalized: String,
    format: OutputFormat,
    plugins: &Plugins,
    work_root: Option<&Path>,
) -> Result<ConversionResult, ConvertError> {
    // ── Stage ────────────────────────────────────────────────────────────
    let workspace = Workspace::create(work_root)?;
    let input_dir = workspace.stage_input(&normalized)?;

    // ── Import ───────────────────────────────────────────────────────────
    let importer = plugins.importer();
    let mut documents = importer
        .import(&input_dir)
        .map_err(|source| ConvertError::Import {
            plugin: importer.name(),
            source,
        })?;
    if documents.len() != 1 {
        return Err(ConvertError::UnsupportedCardinality {
            count: documents.len(),
        });
    }
    let document = documents.remove(0);
    debug!("Imported document '{}'", document.id);

    // ── Export ───────────────────────────────────────────────────────────
    let Some(exporter) = plugins.exporter_for(format) else {
        return Ok(ConversionResult::Passthrough(normalized));
    };

    let output_dir = workspace.reset_output()?;
    exporter
        .export(&document, &output_dir)
        .map_err(|source| ConvertError::Export {
            plugin: exporter.name(),
            source,
        })?;

    // ── Package ──────────────────────────────────────────────────────────
    let archive = workspace.archive_path();
    package::zip_directory(&output_dir, &archive)?;
    let bytes = fs::read(&archive).map_err(ConvertError::workspace("read", &archive))?;

    Ok(ConversionResult::Archive(bytes))
}
