//! Host store seam for the session middleware.
//!
//! The middleware only needs three things from a store: a way to read the
//! current state, a way to dispatch actions, and a place in the action chain.
//! [`StoreApi`] and [`Dispatch`] describe exactly that. [`Store`] is a small
//! reference implementation (reducer plus middleware chain) that composes
//! middlewares right-to-left the way Redux `applyMiddleware` does.

pub mod types;


pub use types::*;

use anyhow::anyhow;
use serde_json::Value;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, Weak};
use tracing::trace;

/// One link of the dispatch chain. Returns whatever the downstream chain returned.
pub type Dispatch = Arc<dyn Fn(Action) -> anyhow::Result<Value> + Send + Sync>;

/// Pure state transition applied by [`Store`]
pub type Reducer<S> = Arc<dyn Fn(&S, &Action) -> S + Send + Sync>;

type StateGetter<S> = Arc<dyn Fn() -> S + Send + Sync>;

/// Store access handed to a middleware when it is attached
pub struct StoreApi<S> {
    get_state: StateGetter<S>,
    dispatch: Dispatch,
}

impl<S> Clone for StoreApi<S> {
    fn clone(&self) -> Self {
        Self {
            get_state: Arc::clone(&self.get_state),
            dispatch: Arc::clone(&self.dispatch),
        }
    }
}

impl<S> StoreApi<S> {
    pub fn new(get_state: impl Fn() -> S + Send + Sync + 'static, dispatch: Dispatch) -> Self {
        Self {
            get_state: Arc::new(get_state),
            dispatch,
        }
    }

    /// Snapshot of the current store state
    pub fn get_state(&self) -> S {
        (self.get_state)()
    }

    /// Dispatch through the full middleware chain
    pub fn dispatch(&self, action: Action) -> anyhow::Result<Value> {
        (self.dispatch)(action)
    }
}

/// A store middleware: given store access and the next link, produce a new link
pub trait Middleware<S>: Send + Sync {
    fn apply(&self, api: StoreApi<S>, next: Dispatch) -> Dispatch;
}

/// Minimal Redux-style store: a locked state slot, a reducer and a middleware chain
pub struct Store<S> {
    state: Arc<RwLock<S>>,
    chain: Arc<OnceLock<Dispatch>>,
}

impl<S> Store<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Create a store without middleware
    pub fn new(reducer: impl Fn(&S, &Action) -> S + Send + Sync + 'static, initial: S) -> Self {
        Self::with_middleware(reducer, initial, Vec::new())
    }

    /// Create a store whose dispatch runs through `middlewares`, outermost first
    pub fn with_middleware(
        reducer: impl Fn(&S, &Action) -> S + Send + Sync + 'static,
        initial: S,
        middlewares: Vec<Arc<dyn Middleware<S>>>,
    ) -> Self {
        let reducer: Reducer<S> = Arc::new(reducer);
        let state = Arc::new(RwLock::new(initial));
        let chain: Arc<OnceLock<Dispatch>> = Arc::new(OnceLock::new());

        let base: Dispatch = {
            let state = Arc::clone(&state);
            Arc::new(move |action: Action| -> anyhow::Result<Value> {
                trace!("Reducing action: {}", action.action_type);
                let mut guard = state.write().unwrap_or_else(PoisonError::into_inner);
                let next_state = reducer(&guard, &action);
                *guard = next_state;
                Ok(action.to_value())
            })
        };

        let api = {
            let state = Arc::clone(&state);
            let chain: Weak<OnceLock<Dispatch>> = Arc::downgrade(&chain);
            StoreApi::new(
                move || read_state(&state),
                Arc::new(move |action: Action| -> anyhow::Result<Value> {
                    let dispatch = chain
                        .upgrade()
                        .and_then(|chain| chain.get().cloned())
                        .ok_or_else(|| anyhow!("Dispatching while the middleware chain is being built is not allowed"))?;
                    dispatch(action)
                }),
            )
        };

        let dispatch = middlewares
            .iter()
            .rev()
            .fold(base, |next, middleware| middleware.apply(api.clone(), next));
        let _ = chain.set(dispatch);

        Self { state, chain }
    }

    /// Snapshot of the current state
    pub fn get_state(&self) -> S {
        read_state(&self.state)
    }

    /// Dispatch an action through the middleware chain
    pub fn dispatch(&self, action: Action) -> anyhow::Result<Value> {
        match self.chain.get() {
            Some(dispatch) => dispatch(action),
            None => Err(anyhow!("Store dispatch chain is not initialized")),
        }
    }
}

fn read_state<S: Clone>(state: &RwLock<S>) -> S {
    state.read().unwrap_or_else(PoisonError::into_inner).clone()
}
