//! Debounced write scheduling.
//!
//! [`DebouncedWriter`] is an explicit {Idle, Scheduled, Disposed} state
//! machine; timers come from an injected [`Scheduler`] so the same writer runs
//! on a tokio runtime or under manual control in tests.

pub mod debounce;
pub mod scheduler;


pub use debounce::*;
pub use scheduler::*;
