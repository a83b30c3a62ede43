use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::document_store::DocumentStore;
use data_error::{CrError, Result};
use fs_atomic_light::temp_and_move;

/// Document store persisting every key as `<path>/<key>.json`.
///
/// There is no in-memory mapping: every call goes to the filesystem, and
/// the file's modification time is the document's write time.
#[derive(Debug, Clone)]
pub struct FolderStore {
    /// Label for logging
    label: String,
    /// Path to the underlying folder where documents are persisted
    path: PathBuf,
}

impl FolderStore {
    /// Create a folder store with a diagnostic label and directory path.
    ///
    /// The directory is created if it does not exist yet.
    pub fn new(label: String, path: &Path) -> Result<Self> {
        if path.exists() && !path.is_dir() {
            return Err(CrError::Storage(
                label,
                "Path is not a directory".to_owned(),
            ));
        }
        fs::create_dir_all(path)?;

        Ok(Self {
            label,
            path: PathBuf::from(path),
        })
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.path.join(format!("{}.json", key))
    }

    fn check_key(&self, key: &str) -> Result<()> {
        if key.is_empty()
            || key.starts_with('.')
            || key.contains(&['/', '\\'][..])
        {
            return Err(CrError::Storage(
                self.label.clone(),
                format!("Invalid document key {:?}", key),
            ));
        }
        Ok(())
    }
}

impl DocumentStore for FolderStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.check_key(key)?;
        match fs::read(self.document_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes go through a temporary file renamed over the document, so
    /// the previous version stays intact until the new one is complete.
    fn put(&self, key: &str, document: &[u8]) -> Result<()> {
        self.check_key(key)?;
        temp_and_move(document, &self.path, &format!("{}.json", key))?;
        log::debug!(
            "{}: wrote document {} ({} bytes)",
            self.label,
            key,
            document.len()
        );
        Ok(())
    }

    fn last_modified(&self, key: &str) -> Result<Option<SystemTime>> {
        self.check_key(key)?;
        match fs::metadata(self.document_path(key)) {
            Ok(metadata) => Ok(Some(metadata.modified()?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
