//! Environment constants and key utilities for session persistence.
//!
//! This module centralizes the action names, storage key conventions and
//! built-in adapter identifiers used throughout the crate, making them easier
//! to maintain and modify.

/// Default minimum interval between two persisted writes, in milliseconds
pub const DEFAULT_THROTTLE_MS: u64 = 2000;

/// Action names recognised or emitted by the default callbacks
pub mod actions {
    /// Emitted by the default `on_load` when stored state is found
    pub const LOAD_STORED_STATE: &str = "LOAD_STORED_STATE";

    /// Recognised by the default `clear_storage` predicate
    pub const CLEAR_STORED_STATE: &str = "CLEAR_STORED_STATE";

    /// Payload field carrying the hydrated state on `LOAD_STORED_STATE`
    pub const STORED_STATE_FIELD: &str = "storedState";
}

/// Built-in adapter identifiers accepted as adapter selectors
pub mod adapters {
    /// Durable key-value persistence backed by the injected storage handle
    pub const LOCAL_STORAGE: &str = "localStorage";

    /// Stub adapter that persists nothing and warns on every call
    pub const COOKIE_STORAGE: &str = "cookieStorage";
}

/// Suffix appended to the namespace to form the storage key
pub const ROOT_KEY_SUFFIX: &str = ".root";

/// Test-related constants
pub mod test {
    /// Namespace used by unit and integration tests
    pub const TEST_NAMESPACE: &str = "test";
}

/// Build the storage key used by built-in adapters for a namespace
pub fn storage_key(namespace: &str) -> String {
    format!("{}{}", namespace, ROOT_KEY_SUFFIX)
}
