//! Storage adapters for persisted session state.
//!
//! Every backend, built-in or custom, implements [`StorageAdapter`]. The
//! built-ins are selectable by name through the [`Builtins`] registry, which is
//! built from an explicit [`Environment`] rather than probing global state.

pub mod backend;
pub mod cookie_storage;
pub mod local_storage;
pub mod resolver;
pub mod types;


pub use backend::*;
pub use cookie_storage::*;
pub use local_storage::*;
pub use resolver::*;
pub use types::*;

use serde_json::Value;

/// Contract every storage backend implements.
///
/// Operations are synchronous. Adapters that need asynchronous I/O must queue
/// or buffer internally. `clear` is idempotent: clearing an empty namespace is
/// not an error.
pub trait StorageAdapter: Send + Sync {
    /// Identifier used in logs and error messages
    fn name(&self) -> &str;

    /// Whether writes are actually persisted
    fn durability(&self) -> Durability {
        Durability::Durable
    }

    /// Persist `data` under `namespace`
    fn set(&self, namespace: &str, data: &Value, options: &AdapterOptions) -> Result<(), AdapterError>;

    /// Read the value stored under `namespace`, if any
    fn get(&self, namespace: &str, options: &AdapterOptions) -> Result<Option<Value>, AdapterError>;

    /// Existence check, independent of `get`
    fn has(&self, namespace: &str, options: &AdapterOptions) -> Result<bool, AdapterError>;

    /// Delete any value stored under `namespace`
    fn clear(&self, namespace: &str, options: &AdapterOptions) -> Result<(), AdapterError>;

    /// Validate the options once at construction time
    fn check(&self, _options: &AdapterOptions) -> Result<(), AdapterError> {
        Ok(())
    }
}
