pub mod detail_service;
pub mod endpoints;
pub mod search_service;

pub use detail_service::MovieDetailService;
pub use endpoints::Endpoint;
pub use search_service::MovieSearchService;
