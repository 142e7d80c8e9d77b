use serde::Serialize;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::modules::catalog::{MovieDetail, MovieDetailApi};
use crate::shared::errors::RemoteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DetailError {
    /// The page had no content-info block
    NotFound,
    NetworkError,
}

impl DetailError {
    pub fn message(&self) -> &'static str {
        match self {
            DetailError::NotFound => "Movie details not found",
            DetailError::NetworkError => "Network error occurred",
        }
    }
}

impl From<&RemoteError> for DetailError {
    fn from(err: &RemoteError) -> Self {
        match err {
            RemoteError::InvalidResponse => DetailError::NotFound,
            _ => DetailError::NetworkError,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailState {
    #[default]
    Idle,
    Loading,
    Loaded(MovieDetail),
    Failed(DetailError),
}

impl DetailState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DetailState::Loading)
    }
}

/// Loads one movie's detail and publishes the outcome. Only the most recent
/// load may publish; starting a load cancels the one before it.
pub struct DetailLoader {
    api: Arc<dyn MovieDetailApi>,
    state: watch::Sender<DetailState>,
    current: Mutex<Option<CancellationToken>>,
}

impl DetailLoader {
    pub fn new(api: Arc<dyn MovieDetailApi>) -> Self {
        let (state, _) = watch::channel(DetailState::Idle);
        Self {
            api,
            state,
            current: Mutex::new(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> DetailState {
        self.state.borrow().clone()
    }

    /// Fetch detail for `slug`. If `cancel` fires first, or a newer load
    /// starts, the load is abandoned and nothing further is published.
    pub async fn load(&self, slug: &str, cancel: &CancellationToken) {
        let token = cancel.child_token();
        let previous = self
            .current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }

        self.state.send_replace(DetailState::Loading);

        let outcome = tokio::select! {
            _ = token.cancelled() => {
                debug!(slug, "detail load cancelled");
                return;
            }
            outcome = self.api.fetch_movie_detail(slug) => outcome,
        };

        // superseded while the response was in transit
        if token.is_cancelled() {
            return;
        }

        let next = match outcome {
            Ok(detail) => DetailState::Loaded(detail),
            Err(err) => {
                warn!(slug, kind = err.kind(), "detail load failed: {}", err);
                DetailState::Failed(DetailError::from(&err))
            }
        };
        self.state.send_replace(next);
    }
}
