use reqwest::{Method, Url};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::shared::errors::{RemoteError, RemoteResult};

type Encoder = Arc<dyn Fn() -> serde_json::Result<Vec<u8>> + Send + Sync>;

/// Request payload: either raw bytes or a value serialized to JSON when the
/// request is built.
#[derive(Clone)]
pub enum RequestBody {
    Bytes(Vec<u8>),
    Json(Encoder),
}

impl RequestBody {
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        RequestBody::Bytes(bytes.into())
    }

    pub fn json<T>(value: T) -> Self
    where
        T: Serialize + Send + Sync + 'static,
    {
        let value = Arc::new(value);
        RequestBody::Json(Arc::new(move || serde_json::to_vec(value.as_ref())))
    }

    fn encode(&self) -> serde_json::Result<Vec<u8>> {
        match self {
            RequestBody::Bytes(bytes) => Ok(bytes.clone()),
            RequestBody::Json(encode) => encode(),
        }
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestBody::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
            RequestBody::Json(_) => f.write_str("Json(..)"),
        }
    }
}

/// Description of one call against the upstream service.
///
/// Setters consume the descriptor and hand back the updated value, so a
/// descriptor is never shared mutably.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    url: String,
    method: Method,
    headers: Option<BTreeMap<String, String>>,
    parameters: Option<BTreeMap<String, String>>,
    body: Option<RequestBody>,
}

impl RequestDescriptor {
    pub fn new(url: impl Into<String>, method: Method) -> Self {
        Self {
            url: url.into(),
            method,
            headers: None,
            parameters: None,
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url, Method::GET)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(url, Method::POST)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replace the whole header map.
    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replace the whole parameter map.
    pub fn with_parameters(mut self, parameters: BTreeMap<String, String>) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn headers(&self) -> Option<&BTreeMap<String, String>> {
        self.headers.as_ref()
    }

    pub fn parameters(&self) -> Option<&BTreeMap<String, String>> {
        self.parameters.as_ref()
    }

    /// Resolve the target URL and its parameters into one absolute URL.
    ///
    /// Parameter names and values are appended as given, in key order; any
    /// escaping is the caller's job. A parameter map replaces the query the
    /// base URL may already carry.
    pub fn resolve_url(&self) -> RemoteResult<Url> {
        let mut url = Url::parse(&self.url).map_err(|_| RemoteError::InvalidUrl)?;

        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(RemoteError::InvalidUrl);
        }

        if let Some(parameters) = &self.parameters {
            if parameters.keys().any(|key| key.is_empty()) {
                return Err(RemoteError::InvalidUrl);
            }

            let query = parameters
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect::<Vec<_>>()
                .join("&");

            url.set_query(if query.is_empty() { None } else { Some(&query) });
        }

        Ok(url)
    }

    /// Build the canonical transport request.
    pub fn build(&self) -> RemoteResult<TransportRequest> {
        let url = self.resolve_url()?;

        let body = match &self.body {
            Some(body) => Some(body.encode().map_err(|e| {
                log::debug!("Request body for {} failed to serialize: {}", url, e);
                RemoteError::InvalidBody
            })?),
            None => None,
        };

        let mut request = TransportRequest::new(self.method.clone(), url);
        if let Some(headers) = &self.headers {
            for (name, value) in headers {
                request = request.with_header(name, value);
            }
        }
        request.body = body;

        Ok(request)
    }
}

/// A fully resolved request, as seen by interceptors and the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    method: Method,
    url: Url,
    headers: BTreeMap<String, String>,
    body: Option<Vec<u8>>,
}

impl TransportRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Set a header, replacing any existing header with the same name
    /// regardless of case.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}
