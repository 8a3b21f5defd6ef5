use crate::adapter::{AdapterError, AdapterOperation};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Namespaces are non-empty runs of ASCII letters, digits and dots
static NAMESPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9.]+$").expect("namespace pattern is a valid regex"));

/// Errors raised while building or running a session middleware
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    #[error("Adapter '{adapter}' rejected the session options: {source}")]
    AdapterCheck {
        adapter: String,
        #[source]
        source: AdapterError,
    },
    #[error("Adapter '{adapter}' failed during {operation}: {source}")]
    AdapterOperation {
        adapter: String,
        operation: AdapterOperation,
        #[source]
        source: AdapterError,
    },
    #[error("Failed to select state for persistence: {0}")]
    Selection(#[from] serde_json::Error),
    #[error("No timer facility available: {0}")]
    NoScheduler(String),
    #[error("Failed to load session config: {0}")]
    ConfigFile(String),
}

impl SessionError {
    pub(crate) fn operation(adapter: &str, operation: AdapterOperation, source: AdapterError) -> Self {
        SessionError::AdapterOperation {
            adapter: adapter.to_string(),
            operation,
            source,
        }
    }
}

/// Validated storage namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    pub fn parse(ns: &str) -> Result<Self, SessionError> {
        if NAMESPACE_PATTERN.is_match(ns) {
            Ok(Self(ns.to_string()))
        } else {
            Err(SessionError::Configuration(format!(
                "You must provide a valid namespace \"ns\" for your project! Got '{}', expected letters, digits and dots",
                ns
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Namespace {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// When the middleware checks storage for state to hydrate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HydrationPolicy {
    /// Before every dispatched action
    #[default]
    EveryAction,
    /// Only before the first action dispatched through the instance
    FirstAction,
}
