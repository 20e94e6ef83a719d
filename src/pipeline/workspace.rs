//! Request-scoped working storage.
//!
//! Plugins talk to the pipeline through the file system: the importer reads
//! a directory, exporters write into one. Every request therefore gets its
//! own uniquely named [`TempDir`], so concurrent conversions never see each
//! other's input or output. The directory is removed when the
//! [`Workspace`] is dropped, on success, error and panic alike.
//!
//! ```text
//! <work_root>/sii-XXXXXX/
//!  ├─ input/input.json   normalized payload, read by the importer
//!  ├─ output/            exporter target
//!  └─ output.zip         packaged output
//! ```

use crate::error::ConvertError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

pub const INPUT_DIR: &str = "input";
pub const INPUT_FILE: &str = "input.json";
pub const OUTPUT_DIR: &str = "output";
pub const ARCHIVE_FILE: &str = "output.zip";

const WORKSPACE_PREFIX: &str = "sii-";

/// Working directory for a single conversion.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a fresh workspace under `root`, or the system temp dir.
    pub fn create(root: Option<&Path>) -> Result<Self, ConvertError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORKSPACE_PREFIX);

        let dir = match root {
            Some(root) => {
                fs::create_dir_all(root).map_err(ConvertError::workspace("create", root))?;
                builder
                    .tempdir_in(root)
                    .map_err(ConvertError::workspace("create", root))?
            }
            None => builder
                .tempdir()
                .map_err(ConvertError::workspace("create", std::env::temp_dir()))?,
        };

        debug!("Workspace created at {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn input_dir(&self) -> PathBuf {
        self.path().join(INPUT_DIR)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.path().join(OUTPUT_DIR)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.path().join(ARCHIVE_FILE)
    }

    /// Write the normalized payload for the importer.
    ///
    /// Returns the directory to hand to the importer; it contains only
    /// the staged input file.
    pub fn stage_input(&self, payload: &str) -> Result<PathBuf, ConvertError> {
        let dir = self.input_dir();
        fs::create_dir_all(&dir).map_err(ConvertError::workspace("create", &dir))?;

        let file = dir.join(INPUT_FILE);
        fs::write(&file, payload).map_err(ConvertError::workspace("write", &file))?;
        debug!("Staged {} bytes at {}", payload.len(), file.display());
        Ok(dir)
    }

    /// Delete any previous output directory and archive, then recreate an
    /// empty output directory.
    pub fn reset_output(&self) -> Result<PathBuf, ConvertError> {
        let out = self.output_dir();
        if out.exists() {
            fs::remove_dir_all(&out).map_err(ConvertError::workspace("delete", &out))?;
        }

        let archive = self.archive_path();
        if archive.exists() {
            fs::remove_file(&archive).map_err(ConvertError::workspace("delete", &archive))?;
        }

        fs::create_dir_all(&out).map_err(ConvertError::workspace("create", &out))?;
        Ok(out)
    }
}
