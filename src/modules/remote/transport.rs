//! Transport adapter contract and the default reqwest-backed adapter.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use super::domain::{RawResponse, TransportRequest};
use crate::shared::errors::{RemoteError, RemoteResult};

#[derive(Error, Debug)]
pub enum TransportError {
    /// DNS, TLS, connect and timeout failures
    #[error("Network failure: {0}")]
    Network(#[source] anyhow::Error),

    #[error("Transport failure: {0}")]
    Other(#[source] anyhow::Error),
}

impl From<TransportError> for RemoteError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Network(cause) => RemoteError::NetworkFailure(cause),
            TransportError::Other(cause) => RemoteError::UnknownFailure(cause),
        }
    }
}

/// Performs one HTTP(S) exchange.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<RawResponse, TransportError>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Client with a whole-request timeout.
    pub fn with_timeout(timeout: Duration) -> RemoteResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::UnknownFailure(e.into()))?;
        Ok(Self { client })
    }

    fn classify(err: reqwest::Error) -> TransportError {
        if err.is_builder() {
            TransportError::Other(err.into())
        } else {
            TransportError::Network(err.into())
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method().clone(), request.url().clone());

        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body() {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().await.map_err(|e| {
            crate::log_debug!("Request to {} failed: {}", request.url(), e);
            Self::classify(e)
        })?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(Self::classify)?;

        Ok(RawResponse::new(status, body.to_vec()))
    }
}
