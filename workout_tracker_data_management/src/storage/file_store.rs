use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{StorageError, DATA_DIR, STORAGE_FILE_EXTENSION};

use super::KeyValueStore;

/// One file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
        }

        Ok(Self { dir })
    }

    /// The `data/` directory under the project root.
    pub fn open_default() -> Result<Self, StorageError> {
        let root: PathBuf = project_root::get_project_root()?;
        Self::open(root.join(DATA_DIR))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}{STORAGE_FILE_EXTENSION}"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!("Failed to read {:?}: {err}", path);
                None
            }
        }
    }

    /// Writes next to the target and renames over it, so readers never see half a blob.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");

        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}
