//! Runs a [`SearchScheduler`] on a tokio task.
//!
//! Queries are sent over a channel; results are published on a watch channel
//! so any number of readers can follow the latest [`SearchSnapshot`].

use std::future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::filter::FilterEngine;
use crate::types::FilterState;

use super::clock::TokioClock;
use super::scheduler::{SearchOutcome, SearchScheduler};

/// Latest results published by the driver.
#[derive(Debug, Clone)]
pub struct SearchSnapshot {
    /// Query behind `state`; `None` before any query has been applied.
    pub query: Option<String>,
    pub state: Arc<FilterState>,
    /// Message from the last rejected query.
    pub error: Option<String>,
}

enum DriverCommand {
    Submit(String),
    Flush(oneshot::Sender<Option<SearchOutcome>>),
}

/// Handle to a running debounced search. Dropping it stops the task.
pub struct DebouncedSearch {
    commands: mpsc::UnboundedSender<DriverCommand>,
    snapshots: watch::Receiver<SearchSnapshot>,
    task: JoinHandle<()>,
}

impl DebouncedSearch {
    /// Spawns the driver on the current tokio runtime.
    pub fn spawn(engine: FilterEngine, window: Duration) -> Self {
        let scheduler = SearchScheduler::new(engine, TokioClock::new(), window);
        let (snapshot_tx, snapshots) = watch::channel(snapshot_of(&scheduler));
        let (commands, command_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_driver(scheduler, command_rx, snapshot_tx));
        Self {
            commands,
            snapshots,
            task,
        }
    }

    /// Queues `query`, restarting the debounce window. Returns false if the
    /// driver has stopped.
    pub fn submit(&self, query: impl Into<String>) -> bool {
        self.commands
            .send(DriverCommand::Submit(query.into()))
            .is_ok()
    }

    /// Evaluates the pending query immediately.
    pub async fn flush(&self) -> Option<SearchOutcome> {
        let (reply, response) = oneshot::channel();
        self.commands.send(DriverCommand::Flush(reply)).ok()?;
        response.await.ok().flatten()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.snapshots.clone()
    }

    pub fn latest(&self) -> SearchSnapshot {
        self.snapshots.borrow().clone()
    }
}

impl Drop for DebouncedSearch {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_driver(
    mut scheduler: SearchScheduler<TokioClock>,
    mut commands: mpsc::UnboundedReceiver<DriverCommand>,
    snapshots: watch::Sender<SearchSnapshot>,
) {
    loop {
        let deadline = scheduler
            .deadline()
            .map(|offset| scheduler.clock().instant_at(offset));

        tokio::select! {
            command = commands.recv() => match command {
                Some(DriverCommand::Submit(query)) => scheduler.submit(query),
                Some(DriverCommand::Flush(reply)) => {
                    let outcome = scheduler.flush();
                    if outcome.is_some() {
                        snapshots.send_replace(snapshot_of(&scheduler));
                    }
                    let _ = reply.send(outcome);
                }
                None => break,
            },
            () = sleep_until(deadline) => {
                if scheduler.poll().is_some() {
                    snapshots.send_replace(snapshot_of(&scheduler));
                }
            }
        }
    }
    log::debug!("debounced search driver stopped");
}

async fn sleep_until(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => future::pending::<()>().await,
    }
}

fn snapshot_of(scheduler: &SearchScheduler<TokioClock>) -> SearchSnapshot {
    SearchSnapshot {
        query: scheduler.current_query().map(str::to_string),
        state: Arc::clone(scheduler.filter_state()),
        error: scheduler.search_error().map(str::to_string),
    }
}
