pub mod movie;
pub mod movie_detail;

pub use movie::Movie;
pub use movie_detail::MovieDetail;
