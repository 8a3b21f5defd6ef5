use crate::adapter::backend::KeyValueStore;
use crate::adapter::types::{AdapterError, AdapterOptions};
use crate::adapter::StorageAdapter;
use crate::env;
use serde_json::Value;
use std::sync::Arc;

/// Durable adapter storing each namespace as a JSON string at `"<ns>.root"`
#[derive(Clone)]
pub struct LocalStorageAdapter {
    storage: Arc<dyn KeyValueStore>,
}

impl LocalStorageAdapter {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }
}

impl StorageAdapter for LocalStorageAdapter {
    fn name(&self) -> &str {
        env::adapters::LOCAL_STORAGE
    }

    fn set(&self, namespace: &str, data: &Value, _options: &AdapterOptions) -> Result<(), AdapterError> {
        let serialized = serde_json::to_string(data)?;
        self.storage.set_item(&env::storage_key(namespace), &serialized)
    }

    fn get(&self, namespace: &str, _options: &AdapterOptions) -> Result<Option<Value>, AdapterError> {
        match self.storage.get_item(&env::storage_key(namespace))? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn has(&self, namespace: &str, _options: &AdapterOptions) -> Result<bool, AdapterError> {
        let item = self.storage.get_item(&env::storage_key(namespace))?;
        Ok(item.is_some_and(|raw| !raw.is_empty()))
    }

    fn clear(&self, namespace: &str, _options: &AdapterOptions) -> Result<(), AdapterError> {
        self.storage.remove_item(&env::storage_key(namespace))
    }
}
