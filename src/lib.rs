mod datasource;
mod editor;
mod error;
mod settings;
mod stations;
pub mod transport;
mod types;
mod weather_data;

pub use datasource::*;
pub use editor::{property_options, TargetEdit};
pub use error::{DatasourceError, SettingsError};
pub use settings::*;

pub use stations::lookup::{candidate_stations, StationLookup, MIN_SEARCH_TERM_LEN};

pub use transport::error::TransportError;
pub use transport::{ReqwestTransport, Transport};

pub use types::api_response::{ApiResponse, ApiRow};
pub use types::data_frame::*;
pub use types::health::*;
pub use types::property::*;
pub use types::query::*;
pub use types::resolution::*;
pub use types::station::*;
pub use types::target::*;

pub use weather_data::error::QueryError;
pub use weather_data::fetcher::RetryingFetcher;
pub use weather_data::mapper::{map_rows, TIME_FIELD};
pub use weather_data::router::{route, ApiRequest, Location};
