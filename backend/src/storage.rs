//! File-backed profile storage
//!
//! Each collection lives in `<data_dir>/<collection>.json`. Every write
//! stages into its own temp file in the same directory and is then renamed
//! over the document, one writer per collection at a time.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use shared::store::{StorageBackend, StoreError, StoreResult};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct FileBackend {
    data_dir: PathBuf,
    write_locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl FileBackend {
    /// Backend rooted at `data_dir`, creating the directory when missing
    pub fn new(data_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self {
            data_dir,
            write_locks: Arc::default(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn document_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", collection))
    }

    fn write_lock(&self, collection: &str) -> StoreResult<Arc<Mutex<()>>> {
        let mut locks = self.write_locks.lock().map_err(|_| poisoned(collection))?;
        Ok(Arc::clone(locks.entry(collection.to_string()).or_default()))
    }
}

fn poisoned(collection: &str) -> StoreError {
    StoreError::Backend(format!("write lock for {} poisoned", collection))
}

impl StorageBackend for FileBackend {
    fn read(&self, collection: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.document_path(collection)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, collection: &str, contents: &str) -> StoreResult<()> {
        let lock = self.write_lock(collection)?;
        let _guard = lock.lock().map_err(|_| poisoned(collection))?;

        let mut staging = NamedTempFile::new_in(&self.data_dir)?;
        staging.write_all(contents.as_bytes())?;
        staging.persist(self.document_path(collection)).map_err(|e| e.error)?;
        Ok(())
    }

    fn exists(&self, collection: &str) -> bool {
        self.document_path(collection).is_file()
    }

    fn is_available(&self) -> bool {
        fs::metadata(&self.data_dir)
            .map(|meta| meta.is_dir() && !meta.permissions().readonly())
            .unwrap_or(false)
    }
}
