pub mod entities;

pub use entities::{Movie, MovieDetail};
