use crate::adapter::backend::KeyValueStore;
use crate::adapter::cookie_storage::CookieStorageAdapter;
use crate::adapter::local_storage::LocalStorageAdapter;
use crate::adapter::StorageAdapter;
use crate::env;
use crate::session::SessionError;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Host capabilities available to built-in adapters.
///
/// Resolved once when a middleware is created; nothing in the crate probes
/// global state to decide which storage exists.
#[derive(Clone, Default)]
pub struct Environment {
    local_storage: Option<Arc<dyn KeyValueStore>>,
}

impl Environment {
    /// An environment with no persistent storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide a persistent key-value store for the `localStorage` built-in
    pub fn with_local_storage(mut self, storage: Arc<dyn KeyValueStore>) -> Self {
        self.local_storage = Some(storage);
        self
    }

    pub fn local_storage(&self) -> Option<&Arc<dyn KeyValueStore>> {
        self.local_storage.as_ref()
    }

    pub fn has_local_storage(&self) -> bool {
        self.local_storage.is_some()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("local_storage", &self.has_local_storage())
            .finish()
    }
}

/// Which adapter a session should use
#[derive(Clone)]
pub enum AdapterSelector {
    /// A caller-supplied adapter, used as-is
    Custom(Arc<dyn StorageAdapter>),
    /// A built-in adapter by name
    Named(String),
}

impl AdapterSelector {
    pub fn custom(adapter: impl StorageAdapter + 'static) -> Self {
        AdapterSelector::Custom(Arc::new(adapter))
    }

    pub fn named(name: impl Into<String>) -> Self {
        AdapterSelector::Named(name.into())
    }
}

impl From<&str> for AdapterSelector {
    fn from(name: &str) -> Self {
        AdapterSelector::named(name)
    }
}

impl From<String> for AdapterSelector {
    fn from(name: String) -> Self {
        AdapterSelector::Named(name)
    }
}

impl From<Arc<dyn StorageAdapter>> for AdapterSelector {
    fn from(adapter: Arc<dyn StorageAdapter>) -> Self {
        AdapterSelector::Custom(adapter)
    }
}

impl fmt::Debug for AdapterSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdapterSelector::Custom(adapter) => f.debug_tuple("Custom").field(&adapter.name()).finish(),
            AdapterSelector::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

/// Registry of built-in adapters available in an environment
#[derive(Clone)]
pub struct Builtins {
    adapters: BTreeMap<&'static str, Arc<dyn StorageAdapter>>,
}

impl Builtins {
    /// `cookieStorage` is always registered; `localStorage` only when the
    /// environment provides a storage handle.
    pub fn for_environment(environment: &Environment) -> Self {
        let mut adapters: BTreeMap<&'static str, Arc<dyn StorageAdapter>> = BTreeMap::new();
        adapters.insert(env::adapters::COOKIE_STORAGE, Arc::new(CookieStorageAdapter));
        if let Some(storage) = environment.local_storage() {
            adapters.insert(
                env::adapters::LOCAL_STORAGE,
                Arc::new(LocalStorageAdapter::new(Arc::clone(storage))),
            );
        }
        Self { adapters }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn StorageAdapter>> {
        self.adapters.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.adapters.keys().copied().collect()
    }
}

/// Resolve an adapter selector to a concrete adapter.
///
/// A custom adapter is returned unchanged. Without a selector the default is
/// `localStorage` when the environment has persistent storage, otherwise
/// `cookieStorage`. Names are looked up in `builtins`.
pub fn resolve(
    selector: Option<&AdapterSelector>,
    builtins: &Builtins,
    environment: &Environment,
) -> Result<Arc<dyn StorageAdapter>, SessionError> {
    let name = match selector {
        Some(AdapterSelector::Custom(adapter)) => {
            debug!("Using custom storage adapter '{}'", adapter.name());
            return Ok(Arc::clone(adapter));
        }
        Some(AdapterSelector::Named(name)) => name.as_str(),
        None if environment.has_local_storage() => env::adapters::LOCAL_STORAGE,
        None => env::adapters::COOKIE_STORAGE,
    };

    builtins.get(name).ok_or_else(|| {
        SessionError::Configuration(format!(
            "A valid storage adapter could not be found for '{}'! You can use one of the built-in adapters by setting adapter to {}. Or, if you need something custom, you can provide an adapter implementing set(), get(), has() and clear()",
            name,
            builtins
                .names()
                .iter()
                .map(|name| format!("\"{}\"", name))
                .collect::<Vec<_>>()
                .join(" or ")
        ))
    })
}
