use crate::adapter::{
    self, AdapterOperation, AdapterOptions, Builtins, Durability, StorageAdapter,
};
use crate::session::options::{ClearPredicate, LoadHandler, SessionOptions, StateSelector};
use crate::session::types::{HydrationPolicy, Namespace, SessionError};
use crate::store::{Action, Dispatch, Middleware, StoreApi};
use crate::writer::{DebouncedWriter, Scheduler, TokioScheduler, WriterState};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Build a session middleware from `options`.
///
/// Fails fast: an invalid namespace or unresolvable adapter is a
/// [`SessionError::Configuration`], and an adapter whose `check` rejects the
/// options yields [`SessionError::AdapterCheck`]. No middleware is produced in
/// either case.
pub fn create<S>(options: SessionOptions<S>) -> Result<SessionMiddleware<S>, SessionError>
where
    S: Send + Sync + 'static,
{
    let namespace = Namespace::parse(&options.ns)?;

    let adapter_options = Arc::new(AdapterOptions {
        ns: namespace.to_string(),
        throttle: u64::try_from(options.throttle.as_millis()).unwrap_or(u64::MAX),
        silent: options.silent,
    });

    let builtins = Builtins::for_environment(&options.environment);
    let adapter = adapter::resolve(options.adapter.as_ref(), &builtins, &options.environment)?;

    adapter
        .check(&adapter_options)
        .map_err(|source| SessionError::AdapterCheck {
            adapter: adapter.name().to_string(),
            source,
        })?;

    if adapter.durability() == Durability::NoOp && !options.silent {
        warn!(
            "Storage adapter '{}' does not persist data; state for namespace '{}' will not survive a restart",
            adapter.name(),
            namespace
        );
    }

    let scheduler = match options.scheduler {
        Some(scheduler) => scheduler,
        None => Arc::new(TokioScheduler::current()?),
    };

    info!(
        "Session middleware created for namespace '{}' using adapter '{}'",
        namespace,
        adapter.name()
    );

    Ok(SessionMiddleware {
        shared: Arc::new(Shared {
            namespace,
            adapter,
            adapter_options,
            select_state: options.select_state,
            on_load: options.on_load,
            clear_storage: options.clear_storage,
            hydration: options.hydration,
            throttle: options.throttle,
            scheduler,
        }),
    })
}

struct Shared<S> {
    namespace: Namespace,
    adapter: Arc<dyn StorageAdapter>,
    adapter_options: Arc<AdapterOptions>,
    select_state: StateSelector<S>,
    on_load: LoadHandler,
    clear_storage: ClearPredicate,
    hydration: HydrationPolicy,
    throttle: Duration,
    scheduler: Arc<dyn Scheduler>,
}

impl<S> Shared<S> {
    fn adapter_error(&self, operation: AdapterOperation, source: adapter::AdapterError) -> SessionError {
        SessionError::operation(self.adapter.name(), operation, source)
    }

    fn persist(&self, api: &StoreApi<S>) -> Result<(), SessionError> {
        let state = api.get_state();
        let selected = (self.select_state)(&state)?;
        debug!("Persisting state for namespace '{}'", self.namespace);
        self.adapter
            .set(self.namespace.as_str(), &selected, &self.adapter_options)
            .map_err(|e| self.adapter_error(AdapterOperation::Set, e))
    }

    fn clear(&self) -> Result<(), SessionError> {
        debug!("Clearing stored state for namespace '{}'", self.namespace);
        self.adapter
            .clear(self.namespace.as_str(), &self.adapter_options)
            .map_err(|e| self.adapter_error(AdapterOperation::Clear, e))
    }

    fn stored_state(&self) -> Result<Option<Value>, SessionError> {
        let ns = self.namespace.as_str();
        let has = self
            .adapter
            .has(ns, &self.adapter_options)
            .map_err(|e| self.adapter_error(AdapterOperation::Has, e))?;
        if !has {
            return Ok(None);
        }

        let stored = self
            .adapter
            .get(ns, &self.adapter_options)
            .map_err(|e| self.adapter_error(AdapterOperation::Get, e))?;
        Ok(Some(stored.unwrap_or(Value::Null)))
    }
}

/// A configured session middleware, attachable to any number of stores
pub struct SessionMiddleware<S> {
    shared: Arc<Shared<S>>,
}

impl<S> Clone for SessionMiddleware<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S> SessionMiddleware<S>
where
    S: Send + Sync + 'static,
{
    pub fn namespace(&self) -> &Namespace {
        &self.shared.namespace
    }

    pub fn adapter(&self) -> &Arc<dyn StorageAdapter> {
        &self.shared.adapter
    }

    /// The options view every adapter call receives
    pub fn adapter_options(&self) -> &Arc<AdapterOptions> {
        &self.shared.adapter_options
    }

    /// Bind to one store. Each instance owns its own debounced writer.
    pub fn attach(&self, api: StoreApi<S>) -> SessionInterceptor<S> {
        let shared = Arc::clone(&self.shared);
        let writer = DebouncedWriter::new(shared.throttle, Arc::clone(&shared.scheduler), {
            let shared = Arc::clone(&shared);
            move || shared.persist(&api)
        });

        SessionInterceptor {
            shared,
            writer,
            hydration_checked: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl<S> Middleware<S> for SessionMiddleware<S>
where
    S: Send + Sync + 'static,
{
    fn apply(&self, api: StoreApi<S>, next: Dispatch) -> Dispatch {
        self.attach(api).wrap(next)
    }
}

/// Per-store interceptor: hydrate, forward, then clear or persist
pub struct SessionInterceptor<S> {
    shared: Arc<Shared<S>>,
    writer: DebouncedWriter<SessionError>,
    hydration_checked: Arc<AtomicBool>,
}

impl<S> Clone for SessionInterceptor<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            writer: self.writer.clone(),
            hydration_checked: Arc::clone(&self.hydration_checked),
        }
    }
}

impl<S> SessionInterceptor<S>
where
    S: Send + Sync + 'static,
{
    /// Link this interceptor in front of `next`
    pub fn wrap(&self, next: Dispatch) -> Dispatch {
        let interceptor = self.clone();
        Arc::new(move |action: Action| interceptor.intercept(&next, action))
    }

    /// Handle one action.
    ///
    /// Stored state (if any) is handed to `on_load` before the action is
    /// forwarded. After `next` returns, the action either clears storage or
    /// triggers a debounced persist, never both. The return value is exactly
    /// what `next` returned.
    pub fn intercept(&self, next: &Dispatch, action: Action) -> anyhow::Result<Value> {
        self.hydrate(next)?;

        let result = next(action.clone())?;

        if (self.shared.clear_storage)(&action) {
            // a write still queued for this window would restore the cleared state
            self.writer.cancel_pending();
            self.shared.clear()?;
        } else {
            let outcome = self.writer.trigger()?;
            debug!("Persist for '{}': {:?}", action.action_type, outcome);
        }

        Ok(result)
    }

    fn hydrate(&self, next: &Dispatch) -> anyhow::Result<()> {
        let first_only = self.shared.hydration == HydrationPolicy::FirstAction;
        if first_only && self.hydration_checked.load(Ordering::SeqCst) {
            return Ok(());
        }

        // a failed check leaves the flag unset so the next action retries
        let stored = self.shared.stored_state()?;
        if first_only {
            self.hydration_checked.store(true, Ordering::SeqCst);
        }

        if let Some(stored) = stored {
            debug!("Hydrating stored state for namespace '{}'", self.shared.namespace);
            (self.shared.on_load)(stored, next)?;
        }
        Ok(())
    }

    pub fn writer_state(&self) -> WriterState {
        self.writer.state()
    }

    /// Write a deferred persist now. Returns whether one was pending.
    pub fn flush(&self) -> Result<bool, SessionError> {
        self.writer.flush()
    }

    /// Stop persisting through this instance; a deferred write is dropped
    pub fn dispose(&self) {
        self.writer.dispose();
    }
}
