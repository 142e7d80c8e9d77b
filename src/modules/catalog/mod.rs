pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod traits;

pub use application::{MovieDetailService, MovieSearchService};
pub use domain::{Movie, MovieDetail};
pub use infrastructure::CatalogMapper;
pub use traits::{MovieDetailApi, MovieSearchApi};
