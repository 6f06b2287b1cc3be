//! Source tree packaging for scan uploads
//!
//! Walks a directory, applies the filter set to each regular file by base
//! name, and writes kept files into a temporary zip archive whose internal
//! layout mirrors the tree below the packaged root. Entry paths are
//! POSIX-style relative paths regardless of host conventions.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use log::debug;
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::Result;
use crate::filter::FilterSet;

/// A packaged source archive on durable storage.
///
/// The backing temp file is removed when this guard drops, on every exit
/// path. Callers hand the path to the upload channel and let the guard fall
/// out of scope once the upload has finished.
#[derive(Debug)]
pub struct PackedArchive {
    file: NamedTempFile,
}

impl PackedArchive {
    /// Path of the archive on disk, valid for the guard's lifetime
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// A per-file failure recorded during a best-effort packaging walk
#[derive(Debug)]
pub struct PackWarning {
    pub path: PathBuf,
    pub message: String,
}

impl std::fmt::Display for PackWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Result of packaging a source directory
#[derive(Debug)]
pub struct PackOutcome {
    pub archive: PackedArchive,
    /// Files that could not be read or written; the walk continued past them
    pub warnings: Vec<PackWarning>,
    /// Number of files written into the archive
    pub file_count: usize,
}

/// Package `source_dir` into a temporary zip archive.
///
/// Fails if the root directory cannot be listed or the archive itself cannot
/// be created or finalized. Per-file read and write failures are collected
/// as warnings and do not abort the walk.
pub fn pack(source_dir: &Path, filters: &FilterSet) -> Result<PackOutcome> {
    // An unlistable root is fatal; everything below it is best-effort.
    fs::read_dir(source_dir)?;

    let mut archive = tempfile::Builder::new()
        .prefix("scanops-")
        .suffix(".zip")
        .tempfile()?;

    let mut warnings = Vec::new();
    let mut file_count = 0usize;
    {
        let mut zip = ZipWriter::new(archive.as_file_mut());
        let options = SimpleFileOptions::default();

        let walker = WalkBuilder::new(source_dir)
            .standard_filters(false)
            .follow_links(false)
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warnings.push(PackWarning {
                        path: source_dir.to_path_buf(),
                        message: err.to_string(),
                    });
                    continue;
                }
            };
            if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            if !filters.keeps(&name) {
                debug!("excluded: {}", path.display());
                continue;
            }
            debug!("included: {}", path.display());

            let data = match fs::read(path) {
                Ok(data) => data,
                Err(err) => {
                    warnings.push(PackWarning {
                        path: path.to_path_buf(),
                        message: err.to_string(),
                    });
                    continue;
                }
            };

            let entry_name = archive_entry_name(source_dir, path);
            if let Err(err) = zip
                .start_file(entry_name.as_str(), options)
                .map_err(|e| e.to_string())
                .and_then(|()| zip.write_all(&data).map_err(|e| e.to_string()))
            {
                warnings.push(PackWarning {
                    path: path.to_path_buf(),
                    message: err,
                });
                continue;
            }
            file_count += 1;
        }

        zip.finish()
            .map_err(|err| std::io::Error::other(err.to_string()))?;
    }

    Ok(PackOutcome {
        archive: PackedArchive { file: archive },
        warnings,
        file_count,
    })
}

/// Relative archive entry name with `/` separators
fn archive_entry_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Read;
    use tempfile::tempdir;

    fn entries(archive: &PackedArchive) -> HashMap<String, Vec<u8>> {
        let file = fs::File::open(archive.path()).unwrap();
        let mut zip = zip::ZipArchive::new(file).unwrap();
        let mut out = HashMap::new();
        for i in 0..zip.len() {
            let mut entry = zip.by_index(i).unwrap();
            let mut data = Vec::new();
            entry.read_to_end(&mut data).unwrap();
            out.insert(entry.name().to_string(), data);
        }
        out
    }

    #[test]
    fn test_pack_inclusion_filter() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"alpha").unwrap();
        fs::write(dir.path().join("b.log"), b"beta").unwrap();

        let filters = FilterSet::parse(["*.txt"]);
        let outcome = pack(dir.path(), &filters).unwrap();

        let contents = entries(&outcome.archive);
        assert_eq!(contents.len(), 1);
        assert_eq!(contents["a.txt"], b"alpha");
        assert_eq!(outcome.file_count, 1);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_pack_exclusion_filter() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"alpha").unwrap();
        fs::write(dir.path().join("b.log"), b"beta").unwrap();

        let filters = FilterSet::parse(["!*.log"]);
        let outcome = pack(dir.path(), &filters).unwrap();

        let contents = entries(&outcome.archive);
        assert_eq!(contents.len(), 1);
        assert!(contents.contains_key("a.txt"));
    }

    #[test]
    fn test_pack_preserves_relative_layout_and_bytes() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/nested")).unwrap();
        fs::write(dir.path().join("src/main.rs"), b"fn main() {}").unwrap();
        fs::write(dir.path().join("src/nested/lib.rs"), b"pub mod x;").unwrap();
        fs::write(dir.path().join("top.rs"), b"// top").unwrap();

        let outcome = pack(dir.path(), &FilterSet::default()).unwrap();

        let contents = entries(&outcome.archive);
        assert_eq!(contents.len(), 3);
        assert_eq!(contents["src/main.rs"], b"fn main() {}");
        assert_eq!(contents["src/nested/lib.rs"], b"pub mod x;");
        assert_eq!(contents["top.rs"], b"// top");
    }

    #[test]
    fn test_pack_unlistable_root_is_fatal() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let result = pack(&missing, &FilterSet::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_archive_removed_on_drop() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"alpha").unwrap();

        let outcome = pack(dir.path(), &FilterSet::default()).unwrap();
        let archive_path = outcome.archive.path().to_path_buf();
        assert!(archive_path.exists());

        drop(outcome);
        assert!(!archive_path.exists());
    }

    #[test]
    fn test_directories_are_not_entries() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("empty")).unwrap();
        fs::write(dir.path().join("a.txt"), b"alpha").unwrap();

        let outcome = pack(dir.path(), &FilterSet::default()).unwrap();
        let contents = entries(&outcome.archive);
        assert_eq!(contents.len(), 1);
        assert!(contents.contains_key("a.txt"));
    }

    #[test]
    fn test_filter_applies_to_base_name_in_subdirs() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("deep")).unwrap();
        fs::write(dir.path().join("deep/keep.txt"), b"k").unwrap();
        fs::write(dir.path().join("deep/skip.log"), b"s").unwrap();

        let filters = FilterSet::parse(["*.txt"]);
        let outcome = pack(dir.path(), &filters).unwrap();

        let contents = entries(&outcome.archive);
        assert_eq!(contents.len(), 1);
        assert!(contents.contains_key("deep/keep.txt"));
    }
}
