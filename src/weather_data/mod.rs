pub mod error;
pub mod fetcher;
pub mod mapper;
pub mod router;
