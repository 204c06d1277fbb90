//! Native filesystem cleanup operations.
//!
//! Both operations keep going after a failed removal and report the first
//! failure once every entry has been attempted. A folder that cannot be
//! listed fails immediately without touching anything.

use crate::error::PurgeError;
use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// First removal failure plus a running count
#[derive(Default)]
struct Failures {
    first: Option<(PathBuf, io::Error)>,
    count: usize,
}

impl Failures {
    fn record(&mut self, path: PathBuf, err: io::Error) {
        log::debug!("Failed to remove {}: {}", path.display(), err);
        self.count += 1;
        if self.first.is_none() {
            self.first = Some((path, err));
        }
    }

    fn into_result(self, removed: usize) -> Result<usize, PurgeError> {
        match self.first {
            None => Ok(removed),
            Some((path, source)) => Err(PurgeError::Remove {
                path,
                failed: self.count,
                source,
            }),
        }
    }
}

/// Remove every immediate child of `folder`, keeping `folder` itself.
///
/// Returns the number of entries removed.
pub fn purge_children(folder: &Path) -> Result<usize, PurgeError> {
    let entries = fs::read_dir(folder).map_err(|source| PurgeError::Unreadable {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut removed = 0usize;
    let mut failures = Failures::default();

    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(err) => {
                failures.record(folder.to_path_buf(), err);
                continue;
            }
        };
        match remove_entry(&path) {
            Ok(()) => removed += 1,
            Err(err) => failures.record(path, err),
        }
    }

    failures.into_result(removed)
}

/// Remove regular files below `folder` last modified before `cutoff`.
///
/// Directories are left in place. Returns the number of files removed.
pub fn purge_files_older_than(folder: &Path, cutoff: DateTime<Utc>) -> Result<usize, PurgeError> {
    fs::read_dir(folder).map_err(|source| PurgeError::Unreadable {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut removed = 0usize;
    let mut failures = Failures::default();

    for entry in WalkDir::new(folder).follow_links(false).into_iter() {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                let path = err.path().unwrap_or(folder).to_path_buf();
                failures.record(path, err.into());
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let modified = match entry.metadata().ok().and_then(|m| m.modified().ok()) {
            Some(time) => DateTime::<Utc>::from(time),
            None => continue,
        };

        if modified < cutoff {
            match fs::remove_file(entry.path()) {
                Ok(()) => removed += 1,
                Err(err) => failures.record(entry.path().to_path_buf(), err),
            }
        }
    }

    failures.into_result(removed)
}

/// Remove a file, symlink or directory tree without following links
fn remove_entry(path: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        return fs::remove_dir_all(path);
    }
    match fs::remove_file(path) {
        // Directory symlinks and junctions on Windows need remove_dir
        Err(err) if cfg!(windows) && meta.file_type().is_symlink() => {
            fs::remove_dir(path).map_err(|_| err)
        }
        other => other,
    }
}
