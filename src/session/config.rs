//! Serializable session configuration
//!
//! [`SessionConfig`] is the data-only part of the session options, loadable
//! from TOML. Missing fields fall back to their defaults, so a file only needs
//! to name what it overrides:
//!
//! ```toml
//! ns = "todo.app"
//! throttle_ms = 500
//! storage_dir = "/var/lib/todo/session"
//! ```

use crate::adapter::{Environment, FileStore};
use crate::env;
use crate::session::types::{HydrationPolicy, SessionError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Storage namespace; required and validated when the middleware is created
    pub ns: String,
    pub throttle_ms: u64,
    /// Suppress diagnostic warnings from stub adapters and fallbacks
    pub silent: bool,
    /// Built-in adapter name; `None` picks one from the environment
    pub adapter: Option<String>,
    /// Directory backing the `localStorage` built-in
    pub storage_dir: Option<PathBuf>,
    pub hydration: HydrationPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ns: String::new(),
            throttle_ms: env::DEFAULT_THROTTLE_MS,
            silent: false,
            adapter: None,
            storage_dir: None,
            hydration: HydrationPolicy::default(),
        }
    }
}

impl SessionConfig {
    pub fn new(ns: impl Into<String>) -> Self {
        Self {
            ns: ns.into(),
            ..Default::default()
        }
    }

    /// Parse from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, SessionError> {
        toml::from_str(content).map_err(|e| SessionError::ConfigFile(e.to_string()))
    }

    /// Load from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, SessionError> {
        let path = path.as_ref();
        debug!("Loading session config from {}", path.display());
        let content = fs::read_to_string(path)
            .map_err(|e| SessionError::ConfigFile(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, SessionError> {
        toml::to_string_pretty(self).map_err(|e| SessionError::ConfigFile(e.to_string()))
    }

    /// Save to a TOML file
    pub fn to_toml_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SessionError> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        fs::write(path, content)
            .map_err(|e| SessionError::ConfigFile(format!("{}: {}", path.display(), e)))
    }

    /// Host capabilities described by this config
    pub fn environment(&self) -> Result<Environment, SessionError> {
        let Some(dir) = &self.storage_dir else {
            return Ok(Environment::new());
        };

        let store = FileStore::new(dir).map_err(|e| {
            SessionError::Configuration(format!(
                "Failed to open storage directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        Ok(Environment::new().with_local_storage(Arc::new(store)))
    }
}
