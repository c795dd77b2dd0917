//! Debounced query scheduling.
//!
//! The scheduler is either idle or holds one pending query with the time it
//! should fire. Each submission replaces the pending query and restarts the
//! wait, so only the last query typed during a burst is ever evaluated.
//!
//! The scheduler never sleeps. Callers drive it with [`SearchScheduler::poll`]
//! at or after [`SearchScheduler::deadline`]; the clock is injected so tests
//! can step time by hand.

use std::sync::Arc;
use std::time::Duration;

use crate::filter::{CompiledQuery, FilterEngine};
use crate::types::FilterState;

use super::clock::Clock;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Pending { query: String, fire_at: Duration },
}

/// What happened when a pending query fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The query compiled and replaced the current results.
    Applied { query: String, match_count: usize },
    /// The query was rejected; the previous results are still current.
    Rejected { query: String, message: String },
}

impl SearchOutcome {
    pub fn query(&self) -> &str {
        match self {
            Self::Applied { query, .. } | Self::Rejected { query, .. } => query,
        }
    }
}

pub struct SearchScheduler<C: Clock> {
    engine: FilterEngine,
    clock: C,
    window: Duration,
    state: SchedulerState,
    current: Arc<FilterState>,
    current_query: Option<String>,
    error: Option<String>,
}

impl<C: Clock> SearchScheduler<C> {
    /// Creates an idle scheduler whose results start as the match-all query.
    pub fn new(engine: FilterEngine, clock: C, window: Duration) -> Self {
        let dataset = engine.dataset();
        let current = CompiledQuery::default().evaluate(dataset.records(), dataset.api_range());
        Self {
            engine,
            clock,
            window,
            state: SchedulerState::Idle,
            current: Arc::new(current),
            current_query: None,
            error: None,
        }
    }

    /// Replaces any pending query and restarts the debounce window.
    pub fn submit(&mut self, query: impl Into<String>) {
        let query = query.into();
        let fire_at = self.clock.now() + self.window;
        if let SchedulerState::Pending { query: dropped, .. } = &self.state {
            log::trace!("superseding pending query {dropped:?}");
        }
        self.state = SchedulerState::Pending { query, fire_at };
    }

    /// Fires the pending query if its window has elapsed.
    pub fn poll(&mut self) -> Option<SearchOutcome> {
        let due = matches!(
            &self.state,
            SchedulerState::Pending { fire_at, .. } if self.clock.now() >= *fire_at
        );
        if due {
            self.fire()
        } else {
            None
        }
    }

    /// Fires the pending query now, without waiting for the window.
    pub fn flush(&mut self) -> Option<SearchOutcome> {
        self.fire()
    }

    /// Drops the pending query, returning it.
    pub fn cancel(&mut self) -> Option<String> {
        match std::mem::replace(&mut self.state, SchedulerState::Idle) {
            SchedulerState::Pending { query, .. } => Some(query),
            SchedulerState::Idle => None,
        }
    }

    fn fire(&mut self) -> Option<SearchOutcome> {
        let SchedulerState::Pending { query, .. } =
            std::mem::replace(&mut self.state, SchedulerState::Idle)
        else {
            return None;
        };

        self.error = None;
        match self.engine.search(&query) {
            Ok(state) => {
                let match_count = state.match_count;
                self.current = Arc::new(state);
                self.current_query = Some(query.clone());
                Some(SearchOutcome::Applied { query, match_count })
            }
            Err(error) => {
                let message = error.to_string();
                if error.is_query_error() {
                    log::warn!("search {query:?} rejected: {message}");
                } else {
                    log::error!("search {query:?} failed: {message}");
                }
                self.error = Some(message.clone());
                Some(SearchOutcome::Rejected { query, message })
            }
        }
    }

    /// Time at which the pending query fires, if any.
    pub fn deadline(&self) -> Option<Duration> {
        match &self.state {
            SchedulerState::Pending { fire_at, .. } => Some(*fire_at),
            SchedulerState::Idle => None,
        }
    }

    pub fn state(&self) -> &SchedulerState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, SchedulerState::Idle)
    }

    /// Results of the last query that compiled.
    pub fn filter_state(&self) -> &Arc<FilterState> {
        &self.current
    }

    /// The query behind [`Self::filter_state`]; `None` for the initial
    /// match-all results.
    pub fn current_query(&self) -> Option<&str> {
        self.current_query.as_deref()
    }

    /// Message from the most recent rejected query, cleared by the next
    /// evaluation.
    pub fn search_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
