pub mod api_response;
pub mod data_frame;
pub mod health;
pub mod property;
pub mod query;
pub mod resolution;
pub mod station;
pub mod target;
