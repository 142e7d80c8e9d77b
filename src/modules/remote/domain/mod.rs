pub mod request;
pub mod response;

pub use request::{RequestBody, RequestDescriptor, TransportRequest};
pub use response::{RawResponse, ResponseEnvelope, StatusMeta, StatusPolicy};
