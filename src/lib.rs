//! # Redux Session
//!
//! State persistence middleware for Redux-style stores. The middleware sits in
//! the dispatch chain, hydrates the store from a storage adapter, and writes a
//! projection of the state back after actions, rate-limited so bursts of
//! actions produce at most one write per throttle window.
//!
//! ## Architecture Overview
//!
//! - **[`adapter`]**: the [`StorageAdapter`] contract, built-in adapters and adapter resolution
//! - **[`writer`]**: debounced write scheduling on an injected timer facility
//! - **[`session`]**: configuration, namespace validation and the middleware itself
//! - **[`store`]**: the store seam (`get_state`, `dispatch`, middleware chain) and a reference store
//!
//! ## Per-action protocol
//!
//! For every dispatched action the middleware:
//!
//! 1. asks the adapter whether state is stored for its namespace and, if so,
//!    hands it to `on_load` together with the downstream dispatch;
//! 2. forwards the action and keeps whatever the chain returns;
//! 3. clears storage if `clear_storage(action)` holds, otherwise triggers a
//!    debounced persist of `select_state(get_state())`;
//! 4. returns the result from step 2.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use redux_session::{Action, Environment, MemoryStore, SessionOptions, Store, Middleware};
//! use serde::{Deserialize, Serialize};
//! use std::sync::Arc;
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! struct Counter {
//!     count: i64,
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let environment = Environment::new().with_local_storage(Arc::new(MemoryStore::new()));
//!     let session = redux_session::create(
//!         SessionOptions::<Counter>::new("counter.app").environment(environment),
//!     )?;
//!
//!     let middlewares: Vec<Arc<dyn Middleware<Counter>>> = vec![Arc::new(session)];
//!     let store = Store::with_middleware(
//!         |state: &Counter, action: &Action| match action.action_type.as_str() {
//!             "INCREMENT" => Counter { count: state.count + 1 },
//!             _ => state.clone(),
//!         },
//!         Counter::default(),
//!         middlewares,
//!     );
//!
//!     store.dispatch(Action::new("INCREMENT"))?;
//!     Ok(())
//! }
//! ```

/// Storage adapters and adapter resolution.
///
/// Defines the four-operation adapter contract, the `localStorage` and
/// `cookieStorage` built-ins, key-value backends and the resolver that maps an
/// adapter selector to a concrete adapter.
pub mod adapter;

/// Debounced write scheduling.
pub mod writer;

/// Session middleware construction and per-action behavior.
///
/// Validates the namespace, resolves and checks the adapter, and builds the
/// middleware that hydrates, forwards, and clears or persists.
pub mod session;

/// Store seam and reference store implementation.
pub mod store;

/// Environment constants and key utilities.
///
/// Centralizes action names, built-in adapter names and the storage key
/// convention.
pub mod env;

// Re-export adapter types
pub use adapter::{
    AdapterError, AdapterOptions, AdapterSelector, Builtins, CookieStorageAdapter, Durability,
    Environment, FileStore, KeyValueStore, LocalStorageAdapter, MemoryStore, StorageAdapter,
};

// Re-export writer types
pub use writer::{DebouncedWriter, ManualScheduler, Scheduler, TokioScheduler, WriterState};

// Re-export session types
pub use session::{
    HydrationPolicy, Namespace, SessionConfig, SessionError, SessionInterceptor, SessionMiddleware,
    SessionOptions, create,
};

// Re-export store types
pub use store::{Action, Dispatch, Middleware, Store, StoreApi};
