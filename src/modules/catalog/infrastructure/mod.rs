pub mod dto;
pub mod mapper;

pub use mapper::CatalogMapper;
