// Shared kernel: error taxonomy, configuration and logging

pub mod config;
pub mod errors;
pub mod utils;

pub use config::ClientConfig;
pub use errors::{RemoteError, RemoteResult};
