//! Shared fakes and fixture loading for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use marquee_lib::modules::catalog::{Movie, MovieSearchApi};
use marquee_lib::modules::remote::{RawResponse, Transport, TransportError, TransportRequest};
use marquee_lib::shared::RemoteResult;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::{oneshot, watch};

/// Raw bytes of `tests/fixtures/<name>`
pub fn fixture(name: &str) -> Vec<u8> {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("missing fixture {}: {}", path, e))
}

pub fn movie(slug: &str, title: &str) -> Movie {
    Movie::new(slug, title, "Subtitle", None)
}

/// Transport that answers from a script and remembers every request.
#[derive(Default)]
pub struct RecordingTransport {
    script: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: Result<RawResponse, TransportError>) -> Self {
        self.script.lock().unwrap().push_back(response);
        self
    }

    pub fn respond_ok(self, body: impl Into<Vec<u8>>) -> Self {
        self.respond(Ok(RawResponse::new(200, body)))
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> TransportRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: TransportRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("transport script exhausted")
    }
}

/// Search fake whose answers are released by the test, one gate per call.
/// Calls without a gate answer with no results immediately.
#[derive(Default)]
pub struct GatedSearch {
    calls: Mutex<Vec<String>>,
    gates: Mutex<HashMap<String, VecDeque<oneshot::Receiver<RemoteResult<Vec<Movie>>>>>>,
}

impl GatedSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the next answer for `query`; send on the returned handle to
    /// release it.
    pub fn gate(&self, query: &str) -> oneshot::Sender<RemoteResult<Vec<Movie>>> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .unwrap()
            .entry(query.to_string())
            .or_default()
            .push_back(rx);
        tx
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieSearchApi for GatedSearch {
    async fn search_movies(&self, query: &str) -> RemoteResult<Vec<Movie>> {
        self.calls.lock().unwrap().push(query.to_string());

        let gate = self
            .gates
            .lock()
            .unwrap()
            .get_mut(query)
            .and_then(VecDeque::pop_front);

        match gate {
            Some(gate) => gate.await.unwrap_or_else(|_| Ok(Vec::new())),
            None => Ok(Vec::new()),
        }
    }
}

/// Wait for a published value matching `predicate`, failing after five
/// seconds of (possibly paused) tokio time.
pub async fn wait_until<T, F>(updates: &mut watch::Receiver<T>, predicate: F)
where
    F: FnMut(&T) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), updates.wait_for(predicate))
        .await
        .expect("timed out waiting for update")
        .expect("publisher dropped");
}
