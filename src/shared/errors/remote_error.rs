use thiserror::Error;

/// Every failure the request pipeline can report.
///
/// Each failure is classified into exactly one member. Cancellation of a
/// search is not an error and never appears here.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Invalid URL")]
    InvalidUrl,

    #[error("Request body could not be serialized")]
    InvalidBody,

    #[error("Response carried no usable status or body")]
    InvalidResponse,

    #[error("Network failure: {0}")]
    NetworkFailure(#[source] anyhow::Error),

    #[error("Server error {code}: {status}")]
    ServerError { status: String, code: u16 },

    #[error("Failed to decode response: {0}")]
    DecodingFailure(#[source] serde_json::Error),

    #[error("Unknown failure: {0}")]
    UnknownFailure(#[source] anyhow::Error),
}

impl RemoteError {
    /// Transport, status and decoding failures all collapse into the single
    /// "network error" state at the UI boundary.
    pub fn is_network_related(&self) -> bool {
        matches!(
            self,
            RemoteError::NetworkFailure(_)
                | RemoteError::ServerError { .. }
                | RemoteError::DecodingFailure(_)
                | RemoteError::UnknownFailure(_)
        )
    }

    /// Short stable name for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteError::InvalidUrl => "invalid_url",
            RemoteError::InvalidBody => "invalid_body",
            RemoteError::InvalidResponse => "invalid_response",
            RemoteError::NetworkFailure(_) => "network_failure",
            RemoteError::ServerError { .. } => "server_error",
            RemoteError::DecodingFailure(_) => "decoding_failure",
            RemoteError::UnknownFailure(_) => "unknown_failure",
        }
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        RemoteError::DecodingFailure(err)
    }
}

// Result type alias for convenience
pub type RemoteResult<T> = Result<T, RemoteError>;
