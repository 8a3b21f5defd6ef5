use crate::writer::scheduler::Scheduler;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, error};

/// Timer state of a [`DebouncedWriter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    /// No write window open
    Idle,
    /// A write ran and its window is open; `dirty` records a trigger during the window
    Scheduled { dirty: bool },
    /// Terminal: pending and future writes are dropped
    Disposed,
}

/// What a call to [`DebouncedWriter::trigger`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The write ran immediately
    Invoked,
    /// A window is open; the write runs when it closes
    Deferred,
    /// The writer has been disposed
    Ignored,
}

type WriteFn<E> = Box<dyn Fn() -> Result<(), E> + Send + Sync>;

struct Inner<E> {
    state: Mutex<WriterState>,
    interval: Duration,
    write: WriteFn<E>,
    scheduler: Arc<dyn Scheduler>,
}

/// Rate-limits a write so at most one starts per interval, without losing
/// triggers that arrive mid-window.
///
/// The first trigger writes immediately and opens a window of `interval`.
/// Triggers during the window coalesce into a single write when it closes,
/// which opens the next window. Timer callbacks hold a weak reference, so
/// dropping every handle stops further writes.
pub struct DebouncedWriter<E> {
    inner: Arc<Inner<E>>,
}

impl<E> Clone for DebouncedWriter<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> DebouncedWriter<E>
where
    E: fmt::Display + 'static,
{
    pub fn new(
        interval: Duration,
        scheduler: Arc<dyn Scheduler>,
        write: impl Fn() -> Result<(), E> + Send + Sync + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(WriterState::Idle),
                interval,
                write: Box::new(write),
                scheduler,
            }),
        }
    }

    pub fn state(&self) -> WriterState {
        *lock(&self.inner.state)
    }

    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    /// Request a write. An immediate write's error is returned to the caller.
    pub fn trigger(&self) -> Result<TriggerOutcome, E> {
        {
            let mut state = lock(&self.inner.state);
            match *state {
                WriterState::Idle => *state = WriterState::Scheduled { dirty: false },
                WriterState::Scheduled { .. } => {
                    *state = WriterState::Scheduled { dirty: true };
                    return Ok(TriggerOutcome::Deferred);
                }
                WriterState::Disposed => return Ok(TriggerOutcome::Ignored),
            }
        }

        arm(&self.inner);
        (self.inner.write)()?;
        Ok(TriggerOutcome::Invoked)
    }

    /// Run a deferred write now instead of at the end of the window.
    /// Returns whether a write ran.
    pub fn flush(&self) -> Result<bool, E> {
        {
            let mut state = lock(&self.inner.state);
            match *state {
                WriterState::Scheduled { dirty: true } => *state = WriterState::Scheduled { dirty: false },
                _ => return Ok(false),
            }
        }

        debug!("Flushing deferred write");
        (self.inner.write)()?;
        Ok(true)
    }

    /// Drop a deferred write without closing the window.
    /// Returns whether one was pending.
    pub fn cancel_pending(&self) -> bool {
        let mut state = lock(&self.inner.state);
        match *state {
            WriterState::Scheduled { dirty: true } => {
                *state = WriterState::Scheduled { dirty: false };
                debug!("Cancelled deferred write");
                true
            }
            _ => false,
        }
    }

    /// Stop writing. A deferred write that has not run yet is dropped.
    pub fn dispose(&self) {
        let mut state = lock(&self.inner.state);
        if let WriterState::Scheduled { dirty: true } = *state {
            debug!("Dropping deferred write on dispose");
        }
        *state = WriterState::Disposed;
    }
}

fn arm<E>(inner: &Arc<Inner<E>>)
where
    E: fmt::Display + 'static,
{
    let weak = Arc::downgrade(inner);
    inner.scheduler.schedule(
        inner.interval,
        Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                fire(&inner);
            }
        }),
    );
}

fn fire<E>(inner: &Arc<Inner<E>>)
where
    E: fmt::Display + 'static,
{
    let rerun = {
        let mut state = lock(&inner.state);
        match *state {
            WriterState::Scheduled { dirty: true } => {
                *state = WriterState::Scheduled { dirty: false };
                true
            }
            WriterState::Scheduled { dirty: false } => {
                *state = WriterState::Idle;
                false
            }
            WriterState::Idle | WriterState::Disposed => false,
        }
    };

    if rerun {
        arm(inner);
        if let Err(e) = (inner.write)() {
            error!("Deferred write failed: {}", e);
        }
    }
}

fn lock(state: &Mutex<WriterState>) -> MutexGuard<'_, WriterState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
