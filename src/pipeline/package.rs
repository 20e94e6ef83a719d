//! Packaging: zip an export output directory.
//!
//! Entries are stored relative to the directory (the directory itself is
//! not an entry), in sorted order, with the fixed DOS epoch as modification
//! time. Zipping the same tree twice yields byte-identical archives.

use crate::error::ConvertError;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

struct Entry {
    path: PathBuf,
    name: String,
    is_dir: bool,
}

/// Zip everything under `source` into a new archive at `destination`.
///
/// Returns the number of file entries written.
pub fn zip_directory(source: &Path, destination: &Path) -> Result<usize, ConvertError> {
    let mut entries = Vec::new();
    collect_entries(source, "", &mut entries)?;

    let file = File::create(destination).map_err(ConvertError::workspace("create", destination))?;
    let mut writer = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let zip_err = |source| ConvertError::Package {
        path: destination.to_path_buf(),
        source,
    };

    let mut files = 0;
    for entry in &entries {
        if entry.is_dir {
            writer
                .add_directory(entry.name.as_str(), options)
                .map_err(zip_err)?;
        } else {
            writer
                .start_file(entry.name.as_str(), options)
                .map_err(zip_err)?;
            let mut input =
                File::open(&entry.path).map_err(ConvertError::workspace("read", &entry.path))?;
            io::copy(&mut input, &mut writer)
                .map_err(ConvertError::workspace("write", destination))?;
            files += 1;
        }
    }
    let buffered = writer.finish().map_err(zip_err)?;
    buffered
        .into_inner()
        .map_err(|e| ConvertError::workspace("write", destination)(e.into_error()))?;

    debug!(
        "Packaged {} files from {} into {}",
        files,
        source.display(),
        destination.display()
    );
    Ok(files)
}

/// Depth-first, name-sorted walk. Directory entries precede their contents.
fn collect_entries(dir: &Path, prefix: &str, out: &mut Vec<Entry>) -> Result<(), ConvertError> {
    let mut children: Vec<_> = fs::read_dir(dir)
        .map_err(ConvertError::workspace("list", dir))?
        .collect::<Result<_, _>>()
        .map_err(ConvertError::workspace("list", dir))?;
    children.sort_by_key(|e| e.file_name());

    for child in children {
        let path = child.path();
        let name = format!("{prefix}{}", child.file_name().to_string_lossy());
        let file_type = child
            .file_type()
            .map_err(ConvertError::workspace("stat", &path))?;

        if file_type.is_dir() {
            let dir_prefix = format!("{name}/");
            out.push(Entry {
                path: path.clone(),
                name: dir_prefix.clone(),
                is_dir: true,
            });
            collect_entries(&path, &dir_prefix, out)?;
        } else {
            out.push(Entry {
                path,
                name,
                is_dir: false,
            });
        }
    }
    Ok(())
}
