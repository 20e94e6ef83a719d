//! Pipeline stages for shipped-item-instance conversion.
//!
//! Each submodule implements exactly one step, so each is testable on its
//! own and the orchestrator in [`crate::convert`] reads as a straight line.
//!
//! ## Data Flow
//!
//! ```text
//! select ──▶ normalize ──▶ workspace ──▶ (importer/exporter) ──▶ package
//! (header)   (body)        (stage/reset)   (plugins)              (zip)
//! ```
//!
//! 1. [`select`]   : map the `content-type` header to an output format
//! 2. [`normalize`]: decode the double-encoded body and strip whitespace
//! 3. [`workspace`]: request-scoped temp directory for plugin file I/O
//! 4. [`package`]  : zip the exporter's output directory deterministically

pub mod normalize;
pub mod package;
pub mod select;
pub mod workspace;
