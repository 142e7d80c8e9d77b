use serde::Serialize;
use std::sync::Arc;

use crate::modules::catalog::Movie;
use crate::shared::errors::RemoteError;

/// User-visible search failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchError {
    /// The query succeeded but matched nothing
    NoResults,
    /// Any pipeline failure
    NetworkError,
}

impl SearchError {
    pub fn title(&self) -> &'static str {
        match self {
            SearchError::NoResults => "No Search Results Found",
            SearchError::NetworkError => "Something Went Wrong",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            SearchError::NoResults => {
                "We couldn't find any matches. Please try searching with a different title."
            }
            SearchError::NetworkError => "We couldn't complete your search. Please try again.",
        }
    }

    pub fn button_text(&self) -> &'static str {
        match self {
            SearchError::NoResults => "Clear Search",
            SearchError::NetworkError => "Try Again",
        }
    }

    /// Resubmitting the same query only makes sense after a failure.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SearchError::NetworkError)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SearchPhase {
    #[default]
    Idle,
    Debouncing,
    Searching,
}

/// Observable state of one search session
#[derive(Debug, Clone, Default)]
pub struct SearchSnapshot {
    pub raw_text: String,
    pub committed_query: Option<String>,
    pub phase: SearchPhase,
    pub results: Vec<Movie>,
    pub error: Option<SearchError>,
    /// The failure behind a `NetworkError`, kept for callers that need the kind
    pub failure: Option<Arc<RemoteError>>,
    pub is_loading: bool,
}
