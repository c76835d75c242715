//! Directory-backed storage: one `<key>.json` file per document.
//!
//! Writes go to a hidden temporary file in the same directory which is then
//! renamed over the target, so a reader never sees a partial document.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::debug;

use super::{StorageBackend, StorageError, StorageKey};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Storage rooted at a directory on disk.
#[derive(Debug)]
pub struct DirectoryStorage {
    dir: Dir,
    root: Utf8PathBuf,
}

impl DirectoryStorage {
    /// Open `root`, creating it and any missing parents.
    pub fn open(root: impl AsRef<Utf8Path>) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        let open_error = |err: io::Error| StorageError::Open {
            path: root.clone(),
            message: err.to_string(),
        };
        Dir::create_ambient_dir_all(&root, ambient_authority()).map_err(open_error)?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority()).map_err(open_error)?;
        debug!(path = %root, "opened storage directory");
        Ok(Self { dir, root })
    }

    /// Directory holding the documents.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn file_name(key: StorageKey) -> String {
        format!("{}.json", key.as_str())
    }
}

impl StorageBackend for DirectoryStorage {
    fn read(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        match self.dir.read_to_string(Self::file_name(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Read {
                key,
                message: err.to_string(),
            }),
        }
    }

    fn write(&self, key: StorageKey, contents: &str) -> Result<(), StorageError> {
        write_atomic(&self.dir, &Self::file_name(key), contents).map_err(|err| {
            StorageError::Write {
                key,
                message: err.to_string(),
            }
        })
    }

    fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        match self.dir.remove_file(Self::file_name(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Write {
                key,
                message: err.to_string(),
            }),
        }
    }
}

fn write_atomic(dir: &Dir, file_name: &str, contents: &str) -> io::Result<()> {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{file_name}.tmp.{}.{suffix}.{counter}",
        std::process::id()
    );

    if let Err(err) = write_temp_file(dir, &tmp_name, contents) {
        drop(dir.remove_file(&tmp_name));
        return Err(err);
    }
    if let Err(err) = replace(dir, &tmp_name, file_name) {
        drop(dir.remove_file(&tmp_name));
        return Err(err);
    }
    // Directory fsync is best effort.
    drop(dir.open(".").and_then(|parent| parent.sync_all()));
    Ok(())
}

fn write_temp_file(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[cfg(windows)]
fn replace(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn replace(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}
