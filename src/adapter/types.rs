use serde::{Deserialize, Serialize};
use std::fmt;

/// Adapter-visible view of the session configuration.
///
/// Computed once when the middleware is created and shared by reference with
/// every adapter call for that middleware. Factory-only settings (adapter
/// selector, callbacks, hydration policy) are not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterOptions {
    pub ns: String,
    /// Minimum interval between writes, in milliseconds
    pub throttle: u64,
    pub silent: bool,
}

/// Whether an adapter actually persists what it is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Durability {
    /// Writes survive the process
    Durable,
    /// Writes are accepted and discarded
    NoOp,
}

/// The four required adapter operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterOperation {
    Set,
    Get,
    Has,
    Clear,
}

impl fmt::Display for AdapterOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AdapterOperation::Set => "set",
            AdapterOperation::Get => "get",
            AdapterOperation::Has => "has",
            AdapterOperation::Clear => "clear",
        };
        f.write_str(name)
    }
}

/// Errors raised by storage adapters and their backends
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("Storage backend error: {0}")]
    Backend(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Unsupported option: {0}")]
    Unsupported(String),
}
