//! Debounced movie search pipeline.
//!
//! The pipeline turns a raw keystroke stream into a bounded list of ranked
//! results. Blank input clears the results immediately; non-blank input is
//! debounced and then resolved through the [`MovieSource`] port. A dedicated
//! worker task serialises lookups, so at most one request is ever in flight
//! and responses can never be observed out of order.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use super::debounce::Debouncer;
use super::movie::Movie;
use super::ports::{MovieSource, SearchOutcome};

/// Maximum number of results surfaced to the caller, preserving the
/// catalogue's own ranking order.
pub const MAX_SEARCH_RESULTS: usize = 10;

/// Default quiescence interval applied to the query stream.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Message shown when the lookup itself failed.
const SEARCH_FAILED_MESSAGE: &str = "Failed to fetch movies";

/// Fallback message when the catalogue reports no match without an
/// explanation.
const NO_MATCH_MESSAGE: &str = "No movies found";

/// Observable search state, published after every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Current results, at most [`MAX_SEARCH_RESULTS`], in catalogue order.
    pub results: Vec<Movie>,
    /// User-facing error message, if the last lookup failed or matched
    /// nothing.
    pub error: Option<String>,
    /// True exactly while a lookup for the settled query is outstanding.
    pub loading: bool,
}

enum SearchCommand {
    Clear,
    Query(String),
}

/// Handle to a running search pipeline.
///
/// Cloning the handle shares the same worker; the worker stops once every
/// handle has been dropped, discarding any pending debounced query without
/// emitting it.
#[derive(Debug, Clone)]
pub struct SearchHandle {
    commands: mpsc::UnboundedSender<SearchCommand>,
    state: watch::Receiver<SearchState>,
}

impl SearchHandle {
    /// Feed the latest raw query text into the pipeline.
    ///
    /// Blank input clears results and error immediately, with no lookup and
    /// no debounce wait. Non-blank input supersedes any earlier pending
    /// query.
    pub fn set_query(&self, raw: &str) {
        let command = if raw.trim().is_empty() {
            SearchCommand::Clear
        } else {
            SearchCommand::Query(raw.to_owned())
        };
        if self.commands.send(command).is_err() {
            tracing::debug!("search worker already stopped; query dropped");
        }
    }

    /// Snapshot of the current search state.
    #[must_use]
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Subscribe to state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.clone()
    }
}

/// Factory for the debounced search worker.
pub struct SearchPipeline;

impl SearchPipeline {
    /// Spawn a worker over the given movie source and return its handle.
    pub fn spawn<S>(source: Arc<S>, delay: Duration) -> SearchHandle
    where
        S: MovieSource + 'static,
    {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SearchState::default());
        let worker = SearchWorker {
            source,
            commands: command_rx,
            state: state_tx,
            debouncer: Debouncer::new(delay),
        };
        tokio::spawn(worker.run());
        SearchHandle {
            commands: command_tx,
            state: state_rx,
        }
    }
}

struct SearchWorker<S> {
    source: Arc<S>,
    commands: mpsc::UnboundedReceiver<SearchCommand>,
    state: watch::Sender<SearchState>,
    debouncer: Debouncer<String>,
}

impl<S: MovieSource> SearchWorker<S> {
    async fn run(mut self) {
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    None => break,
                    Some(SearchCommand::Clear) => {
                        self.debouncer.cancel();
                        self.state.send_replace(SearchState::default());
                    }
                    Some(SearchCommand::Query(query)) => self.debouncer.push(query),
                },
                query = self.debouncer.settled() => self.run_search(&query).await,
            }
        }
    }

    async fn run_search(&self, query: &str) {
        // Previous results stay visible while the lookup is in flight, as a
        // fresh keystroke does not blank the screen.
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        let next = match self.source.search(query).await {
            Ok(SearchOutcome::Found(movies)) => {
                let mut results = movies;
                results.truncate(MAX_SEARCH_RESULTS);
                SearchState {
                    results,
                    error: None,
                    loading: false,
                }
            }
            Ok(SearchOutcome::NoMatch { message }) => SearchState {
                results: Vec::new(),
                error: Some(message.unwrap_or_else(|| NO_MATCH_MESSAGE.to_owned())),
                loading: false,
            },
            Err(error) => {
                tracing::warn!(%error, query, "movie search failed");
                SearchState {
                    results: Vec::new(),
                    error: Some(SEARCH_FAILED_MESSAGE.to_owned()),
                    loading: false,
                }
            }
        };
        self.state.send_replace(next);
    }
}
