use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Which status codes count as success.
///
/// `Legacy` reproduces the upstream client's check, which reduces to
/// `status <= 200`: it rejects 201..=299 and accepts 1xx.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    #[default]
    Standard,
    Legacy,
}

impl StatusPolicy {
    pub fn is_success(&self, code: u16) -> bool {
        match self {
            StatusPolicy::Standard => (200..=299).contains(&code),
            StatusPolicy::Legacy => code <= 200,
        }
    }
}

/// What the transport adapter hands back: a status if one was obtainable,
/// plus the raw body.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: Option<u16>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: Some(status),
            body: body.into(),
        }
    }

    /// A response without any HTTP status.
    pub fn without_status(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: None,
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMeta {
    pub code: u16,
    pub success: bool,
}

impl StatusMeta {
    /// Canonical reason phrase, e.g. "Not Found".
    pub fn description(&self) -> String {
        StatusCode::from_u16(self.code)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("Unknown Status")
            .to_string()
    }
}

/// A validated response travelling through the post-response interceptors.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    status: StatusMeta,
    body: Vec<u8>,
}

impl ResponseEnvelope {
    pub fn new(status: StatusMeta, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> &StatusMeta {
        &self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }
}
