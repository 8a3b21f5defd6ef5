use crate::adapter::types::{AdapterError, AdapterOptions, Durability};
use crate::adapter::StorageAdapter;
use crate::env;
use serde_json::Value;
use tracing::warn;

/// Placeholder for cookie-backed persistence.
///
/// Nothing is stored: every operation only emits a warning (unless the
/// session is `silent`). `durability()` reports [`Durability::NoOp`] so
/// callers can tell it apart from a working adapter. `get` yields nothing and
/// `has` is always false, so hydration never happens through this adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieStorageAdapter;

impl CookieStorageAdapter {
    fn not_implemented(&self, options: &AdapterOptions) {
        if !options.silent {
            warn!(
                "The cookieStorage adapter is a stub; session data for namespace '{}' has not been saved",
                options.ns
            );
        }
    }
}

impl StorageAdapter for CookieStorageAdapter {
    fn name(&self) -> &str {
        env::adapters::COOKIE_STORAGE
    }

    fn durability(&self) -> Durability {
        Durability::NoOp
    }

    fn set(&self, _namespace: &str, _data: &Value, options: &AdapterOptions) -> Result<(), AdapterError> {
        self.not_implemented(options);
        Ok(())
    }

    fn get(&self, _namespace: &str, options: &AdapterOptions) -> Result<Option<Value>, AdapterError> {
        self.not_implemented(options);
        Ok(None)
    }

    fn has(&self, _namespace: &str, options: &AdapterOptions) -> Result<bool, AdapterError> {
        self.not_implemented(options);
        Ok(false)
    }

    fn clear(&self, _namespace: &str, options: &AdapterOptions) -> Result<(), AdapterError> {
        self.not_implemented(options);
        Ok(())
    }
}
