use crate::transport::error::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Either station id or coordinates have to be provided (target '{ref_id}')")]
    NoLocation { ref_id: String },

    #[error("Fetching weather data failed for target '{ref_id}'")]
    Transport {
        ref_id: String,
        #[source]
        source: TransportError,
    },
}

impl QueryError {
    /// The correlation id of the target that failed.
    pub fn ref_id(&self) -> &str {
        match self {
            QueryError::NoLocation { ref_id } | QueryError::Transport { ref_id, .. } => ref_id,
        }
    }
}
