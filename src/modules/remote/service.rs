//! The request pipeline: build, intercept, transport, validate, intercept, decode.

use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::domain::{RequestDescriptor, ResponseEnvelope, StatusMeta, StatusPolicy};
use super::interceptors::{RequestInterceptor, ResponseInterceptor};
use super::transport::Transport;
use crate::shared::errors::{RemoteError, RemoteResult};
use crate::shared::utils::{LogContext, TimedOperation};

/// Executes request descriptors against the upstream service.
///
/// Interceptors run strictly in the order they were registered on the
/// builder. Nothing is retried or recovered here; every failure is classified
/// and returned.
pub struct RemoteService {
    transport: Arc<dyn Transport>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
    status_policy: StatusPolicy,
}

pub struct RemoteServiceBuilder {
    transport: Arc<dyn Transport>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
    status_policy: StatusPolicy,
}

impl RemoteServiceBuilder {
    pub fn request_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.request_interceptors.push(interceptor);
        self
    }

    pub fn response_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.response_interceptors.push(interceptor);
        self
    }

    pub fn status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    pub fn build(self) -> RemoteService {
        RemoteService {
            transport: self.transport,
            request_interceptors: self.request_interceptors,
            response_interceptors: self.response_interceptors,
            status_policy: self.status_policy,
        }
    }
}

impl RemoteService {
    pub fn builder(transport: Arc<dyn Transport>) -> RemoteServiceBuilder {
        RemoteServiceBuilder {
            transport,
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
            status_policy: StatusPolicy::default(),
        }
    }

    pub fn status_policy(&self) -> StatusPolicy {
        self.status_policy
    }

    /// Run the full pipeline and decode the body into `T`.
    pub async fn execute<T>(&self, descriptor: RequestDescriptor) -> RemoteResult<T>
    where
        T: DeserializeOwned,
    {
        let envelope = self.execute_raw(descriptor).await?;

        serde_json::from_slice(envelope.body()).map_err(|e| {
            LogContext::error_with_context(&e, "decoding response body");
            RemoteError::DecodingFailure(e)
        })
    }

    /// Run the pipeline up to, but not including, decoding.
    pub async fn execute_raw(&self, descriptor: RequestDescriptor) -> RemoteResult<ResponseEnvelope> {
        let request = descriptor.build()?;

        let method = request.method().to_string();
        let endpoint = request.url().path().to_string();
        LogContext::api_call(&method, &endpoint, "pending", None);

        let mut request = request;
        for interceptor in &self.request_interceptors {
            request = interceptor.intercept(request).await?;
        }

        let timer = TimedOperation::new(&format!("{} {}", method, endpoint));
        let raw = self.transport.send(request).await.map_err(|e| {
            log::warn!("Transport failed for {} {}: {}", method, endpoint, e);
            RemoteError::from(e)
        })?;

        let code = raw.status.ok_or_else(|| {
            log::warn!("{} {} returned no HTTP status", method, endpoint);
            RemoteError::InvalidResponse
        })?;

        let status = StatusMeta {
            code,
            success: self.status_policy.is_success(code),
        };
        LogContext::api_call(&method, &endpoint, &code.to_string(), Some(timer.finish()));

        if !status.success {
            return Err(RemoteError::ServerError {
                status: status.description(),
                code,
            });
        }

        let mut envelope = ResponseEnvelope::new(status, raw.body);
        for interceptor in &self.response_interceptors {
            envelope = interceptor.intercept(envelope).await?;
        }

        Ok(envelope)
    }
}
