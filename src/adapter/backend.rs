use crate::adapter::types::AdapterError;
use dashmap::DashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// String key-value storage handle injected into the `localStorage` adapter.
///
/// Mirrors the browser Storage API: all methods take `&self`, so
/// implementations use interior mutability. Removing a missing key is not an
/// error.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, AdapterError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), AdapterError>;

    fn remove_item(&self, key: &str) -> Result<(), AdapterError>;
}

/// Process-local storage, shared by cloning the handle into an `Arc`
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, AdapterError> {
        Ok(self.items.get(key).map(|entry| entry.value().clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AdapterError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), AdapterError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Directory-backed storage: one file per key, replaced atomically on write
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a storage directory
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, AdapterError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        debug!("File store opened at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn item_path(&self, key: &str) -> Result<PathBuf, AdapterError> {
        if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
            return Err(AdapterError::Backend(format!(
                "Key '{}' cannot be used as a file name",
                key
            )));
        }
        Ok(self.root.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, AdapterError> {
        let path = self.item_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AdapterError> {
        let path = self.item_path(key)?;
        let temp_path = self
            .root
            .join(format!(".{}.{}.tmp", key, uuid::Uuid::new_v4()));

        fs::write(&temp_path, value)?;
        if let Err(e) = fs::rename(&temp_path, &path) {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                warn!("Failed to remove temp file {}: {}", temp_path.display(), cleanup);
            }
            return Err(e.into());
        }

        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), AdapterError> {
        let path = self.item_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
