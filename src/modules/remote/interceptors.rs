use async_trait::async_trait;
use std::sync::Arc;

use super::domain::{ResponseEnvelope, TransportRequest};
use crate::modules::auth::CredentialProvider;
use crate::shared::errors::RemoteResult;

/// Transform applied to every request before it reaches the transport.
///
/// A failure aborts the pipeline and is returned to the caller as is.
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    async fn intercept(&self, request: TransportRequest) -> RemoteResult<TransportRequest>;
}

/// Transform applied to every validated response before decoding.
#[async_trait]
pub trait ResponseInterceptor: Send + Sync {
    async fn intercept(&self, response: ResponseEnvelope) -> RemoteResult<ResponseEnvelope>;
}

/// Injects the credential provider's headers into each request
pub struct AuthenticationInterceptor {
    credentials: Arc<dyn CredentialProvider>,
}

impl AuthenticationInterceptor {
    pub fn new(credentials: Arc<dyn CredentialProvider>) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl RequestInterceptor for AuthenticationInterceptor {
    async fn intercept(&self, request: TransportRequest) -> RemoteResult<TransportRequest> {
        let headers = self.credentials.auth_headers().await;
        log::debug!("Injecting {} auth headers into {}", headers.len(), request.url());

        Ok(headers
            .into_iter()
            .fold(request, |request, (name, value)| request.with_header(name, value)))
    }
}
