//! Debounced search over a loaded dataset.
//!
//! This module provides:
//! - The [`SearchScheduler`] state machine (idle or one pending query)
//! - Clocks the scheduler can be driven by
//! - A tokio driver that runs the scheduler in real time

mod clock;
mod driver;
mod scheduler;

pub use clock::{Clock, ManualClock, TokioClock};
pub use driver::{DebouncedSearch, SearchSnapshot};
pub use scheduler::{SchedulerState, SearchOutcome, SearchScheduler, DEFAULT_DEBOUNCE};
