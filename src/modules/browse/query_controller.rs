//! Search-as-you-type session: debounces text, runs at most one search at a
//! time and publishes results for the latest committed query only.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use super::clock::{Clock, TokioClock};
use super::debouncer::Debouncer;
use super::search_state::{SearchError, SearchPhase, SearchSnapshot};
use crate::modules::catalog::{Movie, MovieSearchApi};
use crate::shared::config::ClientConfig;
use crate::shared::errors::{RemoteError, RemoteResult};

struct InFlightSearch {
    generation: u64,
    query: String,
    token: CancellationToken,
    task: JoinHandle<()>,
}

struct SearchCompletion {
    generation: u64,
    query: String,
    outcome: RemoteResult<Vec<Movie>>,
}

/// Owns one search session.
///
/// All state changes happen on the task that owns the controller. Searches
/// run on spawned tasks and report back through a channel; starting a search
/// always cancels its predecessor first.
pub struct QueryController {
    search: Arc<dyn MovieSearchApi>,
    clock: Arc<dyn Clock>,
    debouncer: Debouncer<String>,
    session: SearchSnapshot,
    generation: u64,
    in_flight: Option<InFlightSearch>,
    completions_tx: mpsc::UnboundedSender<SearchCompletion>,
    completions_rx: mpsc::UnboundedReceiver<SearchCompletion>,
    snapshot_tx: watch::Sender<SearchSnapshot>,
}

impl QueryController {
    pub fn new(search: Arc<dyn MovieSearchApi>, clock: Arc<dyn Clock>, debounce: Duration) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, _) = watch::channel(SearchSnapshot::default());

        Self {
            search,
            clock,
            debouncer: Debouncer::new(debounce),
            session: SearchSnapshot::default(),
            generation: 0,
            in_flight: None,
            completions_tx,
            completions_rx,
            snapshot_tx,
        }
    }

    pub fn from_config(search: Arc<dyn MovieSearchApi>, config: &ClientConfig) -> Self {
        Self::new(search, Arc::new(TokioClock), config.debounce())
    }

    pub fn snapshot(&self) -> &SearchSnapshot {
        &self.session
    }

    /// Receive every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn has_search_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Record a raw text change and restart the debounce window.
    pub fn set_query_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.debouncer.push(text.clone(), self.clock.now());
        self.session.raw_text = text;
        self.session.phase = SearchPhase::Debouncing;
        self.publish();
    }

    /// Commit the debounced value if its window has closed. Returns the
    /// released value, even when it turned out to be a duplicate.
    pub fn poll_debounce(&mut self) -> Option<String> {
        let value = self.debouncer.poll(self.clock.now())?;
        self.commit(value.clone());
        Some(value)
    }

    /// Clear the query right away, skipping the debounce window.
    pub fn clear(&mut self) {
        self.debouncer.cancel();
        self.session.raw_text.clear();
        self.commit(String::new());
    }

    /// Re-run the committed query after a network error. Returns whether a
    /// search was started.
    pub fn retry(&mut self) -> bool {
        let retryable = self
            .session
            .error
            .is_some_and(|error| error.is_retryable());

        match self.session.committed_query.clone() {
            Some(query) if retryable && !query.trim().is_empty() => {
                debug!(query = %query, "retrying search");
                self.start_search(query);
                true
            }
            _ => false,
        }
    }

    /// Wait until the in-flight search publishes. Returns false when there is
    /// nothing in flight. A search task that dies without answering settles
    /// the session as a network error.
    pub async fn next_completion(&mut self) -> bool {
        while self.in_flight.is_some() {
            tokio::select! {
                biased;
                completion = self.completions_rx.recv() => match completion {
                    Some(completion) => {
                        if self.apply_completion(completion) {
                            return true;
                        }
                    }
                    None => break,
                },
                joined = join_in_flight(&mut self.in_flight) => {
                    return self.handle_task_exit(joined);
                }
            }
        }
        false
    }

    /// Drive the session from a stream of text changes until the sender is
    /// dropped. Expects a clock that follows tokio time.
    pub async fn run(mut self, mut input: mpsc::Receiver<String>) {
        loop {
            let deadline = self.debouncer.deadline();

            tokio::select! {
                biased;
                Some(completion) = self.completions_rx.recv() => {
                    self.apply_completion(completion);
                }
                joined = join_in_flight(&mut self.in_flight) => {
                    self.handle_task_exit(joined);
                }
                text = input.recv() => match text {
                    Some(text) => self.set_query_text(text),
                    None => break,
                },
                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.poll_debounce();
                }
            }
        }

        self.cancel_in_flight();
        debug!("query controller stopped");
    }

    fn commit(&mut self, value: String) {
        if self.session.committed_query.as_deref() == Some(value.as_str()) {
            debug!(query = %value, "ignoring duplicate query");
            self.session.phase = self.settled_phase();
            self.publish();
            return;
        }

        self.session.committed_query = Some(value.clone());

        if value.trim().is_empty() {
            self.cancel_in_flight();
            self.session.results.clear();
            self.session.error = None;
            self.session.failure = None;
            self.session.is_loading = false;
            self.session.phase = self.settled_phase();
            self.publish();
            return;
        }

        self.start_search(value);
    }

    fn start_search(&mut self, query: String) {
        self.cancel_in_flight();

        self.generation += 1;
        let generation = self.generation;
        let token = CancellationToken::new();

        let task = {
            let search = Arc::clone(&self.search);
            let completions = self.completions_tx.clone();
            let token = token.clone();
            let query = query.clone();

            tokio::spawn(async move {
                let outcome = tokio::select! {
                    _ = token.cancelled() => return,
                    outcome = search.search_movies(&query) => outcome,
                };

                // cancelled while the response was in transit
                if token.is_cancelled() {
                    return;
                }

                let _ = completions.send(SearchCompletion {
                    generation,
                    query,
                    outcome,
                });
            })
        };

        debug!(query = %query, generation, "search started");
        self.in_flight = Some(InFlightSearch {
            generation,
            query,
            token,
            task,
        });

        self.session.results.clear();
        self.session.error = None;
        self.session.failure = None;
        self.session.is_loading = true;
        self.session.phase = self.settled_phase();
        self.publish();
    }

    fn cancel_in_flight(&mut self) {
        if let Some(search) = self.in_flight.take() {
            search.token.cancel();
            debug!(query = %search.query, generation = search.generation, "search cancelled");
        }
    }

    fn apply_completion(&mut self, completion: SearchCompletion) -> bool {
        let is_current = self.in_flight.as_ref().is_some_and(|search| {
            search.generation == completion.generation && !search.token.is_cancelled()
        });
        if !is_current {
            debug!(query = %completion.query, "discarding superseded search result");
            return false;
        }

        if self.session.committed_query.as_deref() != Some(completion.query.as_str()) {
            debug!(query = %completion.query, "discarding stale search result");
            return false;
        }

        self.in_flight = None;
        self.session.is_loading = false;

        match completion.outcome {
            Ok(movies) if movies.is_empty() => {
                self.session.results.clear();
                self.session.error = Some(SearchError::NoResults);
                self.session.failure = None;
            }
            Ok(movies) => {
                self.session.results = movies;
                self.session.error = None;
                self.session.failure = None;
            }
            Err(err) => {
                warn!(
                    query = %completion.query,
                    kind = err.kind(),
                    network = err.is_network_related(),
                    "search failed: {}",
                    err
                );
                self.session.results.clear();
                self.session.error = Some(SearchError::NetworkError);
                self.session.failure = Some(Arc::new(err));
            }
        }

        self.session.phase = self.settled_phase();
        self.publish();
        true
    }

    /// The current search task finished without a completion being applied.
    /// Its handle is dropped here and never polled again.
    fn handle_task_exit(&mut self, joined: Result<(), JoinError>) -> bool {
        let Some(search) = self.in_flight.take() else {
            return false;
        };

        let reason = match joined {
            Err(err) if err.is_panic() => "search task panicked",
            Err(_) => "search task was aborted",
            Ok(()) => "search task ended without a result",
        };
        error!(query = %search.query, generation = search.generation, "{}", reason);

        self.session.is_loading = false;
        self.session.results.clear();
        self.session.error = Some(SearchError::NetworkError);
        self.session.failure = Some(Arc::new(RemoteError::UnknownFailure(anyhow::anyhow!(
            reason
        ))));
        self.session.phase = self.settled_phase();
        self.publish();
        true
    }

    fn settled_phase(&self) -> SearchPhase {
        if self.debouncer.is_pending() {
            SearchPhase::Debouncing
        } else if self.in_flight.is_some() {
            SearchPhase::Searching
        } else {
            SearchPhase::Idle
        }
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.session.clone());
    }
}

/// Resolves when the current search task exits; pends forever when idle.
async fn join_in_flight(in_flight: &mut Option<InFlightSearch>) -> Result<(), JoinError> {
    match in_flight {
        Some(search) => (&mut search.task).await,
        None => std::future::pending().await,
    }
}

impl Drop for QueryController {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}
