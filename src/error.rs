use crate::transport::error::TransportError;
use crate::weather_data::error::QueryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasourceError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to parse data source settings")]
    Json(#[from] serde_json::Error),

    #[error("Data source settings do not contain a URL")]
    MissingUrl,
}
