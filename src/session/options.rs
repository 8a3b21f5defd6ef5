use crate::adapter::{AdapterSelector, Environment, StorageAdapter};
use crate::env::{self, actions};
use crate::session::config::SessionConfig;
use crate::session::types::{HydrationPolicy, SessionError};
use crate::store::{Action, Dispatch};
use crate::writer::Scheduler;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Projects store state to the value that gets persisted
pub type StateSelector<S> = Arc<dyn Fn(&S) -> serde_json::Result<Value> + Send + Sync>;

/// Receives hydrated state and the downstream dispatch
pub type LoadHandler = Arc<dyn Fn(Value, &Dispatch) -> anyhow::Result<()> + Send + Sync>;

/// Decides whether an action wipes the stored state
pub type ClearPredicate = Arc<dyn Fn(&Action) -> bool + Send + Sync>;

/// Default `on_load`: dispatch `LOAD_STORED_STATE` carrying the stored value
pub fn default_on_load(stored_state: Value, next: &Dispatch) -> anyhow::Result<()> {
    next(Action::load_stored_state(stored_state))?;
    Ok(())
}

/// Default `clear_storage`: true for `CLEAR_STORED_STATE`
pub fn default_clear_storage(action: &Action) -> bool {
    action.is(actions::CLEAR_STORED_STATE)
}

/// Options for [`create`](crate::session::create).
///
/// Starts from the defaults; each builder call overrides one setting.
pub struct SessionOptions<S> {
    pub(crate) ns: String,
    pub(crate) throttle: Duration,
    pub(crate) silent: bool,
    pub(crate) select_state: StateSelector<S>,
    pub(crate) on_load: LoadHandler,
    pub(crate) clear_storage: ClearPredicate,
    pub(crate) adapter: Option<AdapterSelector>,
    pub(crate) hydration: HydrationPolicy,
    pub(crate) environment: Environment,
    pub(crate) scheduler: Option<Arc<dyn Scheduler>>,
}

impl<S> SessionOptions<S>
where
    S: Serialize + 'static,
{
    /// Defaults for `ns`; the whole state is persisted as JSON
    pub fn new(ns: impl Into<String>) -> Self {
        Self {
            ns: ns.into(),
            throttle: Duration::from_millis(env::DEFAULT_THROTTLE_MS),
            silent: false,
            select_state: Arc::new(|state: &S| serde_json::to_value(state)),
            on_load: Arc::new(default_on_load),
            clear_storage: Arc::new(default_clear_storage),
            adapter: None,
            hydration: HydrationPolicy::default(),
            environment: Environment::default(),
            scheduler: None,
        }
    }

    /// Options from a config record, including its storage environment
    pub fn from_config(config: &SessionConfig) -> Result<Self, SessionError> {
        let mut options = Self::new(config.ns.clone())
            .throttle_ms(config.throttle_ms)
            .silent(config.silent)
            .hydration(config.hydration)
            .environment(config.environment()?);
        if let Some(name) = &config.adapter {
            options = options.adapter(name.as_str());
        }
        Ok(options)
    }
}

impl<S> SessionOptions<S> {
    pub fn throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn throttle_ms(self, millis: u64) -> Self {
        self.throttle(Duration::from_millis(millis))
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn select_state(
        mut self,
        select: impl Fn(&S) -> serde_json::Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.select_state = Arc::new(select);
        self
    }

    pub fn on_load(
        mut self,
        on_load: impl Fn(Value, &Dispatch) -> anyhow::Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.on_load = Arc::new(on_load);
        self
    }

    pub fn clear_storage(mut self, predicate: impl Fn(&Action) -> bool + Send + Sync + 'static) -> Self {
        self.clear_storage = Arc::new(predicate);
        self
    }

    /// Select a built-in by name or pass a custom adapter
    pub fn adapter(mut self, selector: impl Into<AdapterSelector>) -> Self {
        self.adapter = Some(selector.into());
        self
    }

    pub fn custom_adapter(self, adapter: impl StorageAdapter + 'static) -> Self {
        self.adapter(AdapterSelector::custom(adapter))
    }

    pub fn hydration(mut self, policy: HydrationPolicy) -> Self {
        self.hydration = policy;
        self
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Timer facility for deferred writes; defaults to the current tokio runtime
    pub fn scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn ns(&self) -> &str {
        &self.ns
    }
}

impl<S> fmt::Debug for SessionOptions<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionOptions")
            .field("ns", &self.ns)
            .field("throttle", &self.throttle)
            .field("silent", &self.silent)
            .field("adapter", &self.adapter)
            .field("hydration", &self.hydration)
            .field("environment", &self.environment)
            .field("scheduler", &self.scheduler.is_some())
            .finish_non_exhaustive()
    }
}
