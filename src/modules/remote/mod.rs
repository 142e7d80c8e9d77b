pub mod domain;
pub mod interceptors;
pub mod service;
pub mod transport;

pub use domain::{
    RawResponse, RequestBody, RequestDescriptor, ResponseEnvelope, StatusMeta, StatusPolicy,
    TransportRequest,
};
pub use interceptors::{AuthenticationInterceptor, RequestInterceptor, ResponseInterceptor};
pub use service::{RemoteService, RemoteServiceBuilder};
pub use transport::{ReqwestTransport, Transport, TransportError};
