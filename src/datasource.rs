//! This module provides the main entry point of the data source.
//! It runs batch queries from the dashboard host, searches stations for the query
//! editor, and performs the connection health check.

use crate::error::DatasourceError;
use crate::settings::DatasourceSettings;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::api_response::ApiResponse;
use crate::types::data_frame::DataFrame;
use crate::types::health::HealthCheck;
use crate::types::query::{QueryRequest, QueryResponse};
use crate::types::resolution::{DateRange, Resolution};
use crate::types::station::StationSearchResponse;
use crate::types::target::QueryTarget;
use crate::weather_data::error::QueryError;
use crate::weather_data::fetcher::RetryingFetcher;
use crate::weather_data::mapper::map_rows;
use crate::weather_data::router::{route, ApiRequest, Location};
use bon::bon;
use chrono::{Duration, Utc};
use futures_util::future::try_join_all;
use log::{debug, error, info};
use serde_json::Value;

/// Station queried by [`MeteostatDatasource::test_datasource`] (Berlin-Tempelhof).
pub const HEALTH_CHECK_STATION: &str = "10702";

/// The Meteostat data source.
///
/// Translates dashboard queries into Meteostat API calls and the responses into
/// [`DataFrame`]s. All network access goes through the [`Transport`] `T`, which
/// defaults to [`ReqwestTransport`].
///
/// # Examples
///
/// ```no_run
/// # use meteostat_datasource::{DatasourceError, DatasourceSettings, MeteostatDatasource};
/// # use meteostat_datasource::{DateRange, QueryRequest, QueryTarget};
/// # use chrono::NaiveDate;
/// # #[tokio::main]
/// # async fn main() -> Result<(), DatasourceError> {
/// let settings = DatasourceSettings::builder()
///     .url("http://localhost:3000/api/datasources/proxy/1")
///     .build();
/// let datasource = MeteostatDatasource::new(settings)?;
///
/// let request = QueryRequest::builder()
///     .targets(vec![QueryTarget::new("A").with_station("10637")])
///     .range(DateRange::from_dates(
///         NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2020, 2, 3).unwrap(),
///     ))
///     .build();
/// let response = datasource.query(&request).await?;
/// println!("{:?}", response.data[0].field_names());
/// # Ok(())
/// # }
/// ```
pub struct MeteostatDatasource<T = ReqwestTransport> {
    fetcher: RetryingFetcher<T>,
}

impl MeteostatDatasource<ReqwestTransport> {
    /// Creates a data source that talks to the API over HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`DatasourceError::Transport`] if the HTTP client cannot be built,
    /// for instance because the API key is not a valid header value.
    pub fn new(settings: DatasourceSettings) -> Result<Self, DatasourceError> {
        let transport = ReqwestTransport::new(&settings)?;
        Ok(Self::with_transport(&settings, transport))
    }

    /// Creates a data source from the host's persisted instance settings JSON.
    ///
    /// See [`DatasourceSettings::from_instance_json`] for the expected shape.
    pub fn from_instance_json(json: &str) -> Result<Self, DatasourceError> {
        Self::new(DatasourceSettings::from_instance_json(json)?)
    }
}

#[bon]
impl<T: Transport> MeteostatDatasource<T> {
    /// Creates a data source that sends its requests through `transport`.
    pub fn with_transport(settings: &DatasourceSettings, transport: T) -> Self {
        Self {
            fetcher: RetryingFetcher::new(transport, settings.api_root(), settings.max_retries),
        }
    }

    pub fn transport(&self) -> &T {
        self.fetcher.transport()
    }

    /// Runs a batch query.
    ///
    /// The resolution is decided once from the request's range and applies to all
    /// targets. Every target is routed before anything is sent, so a target without
    /// a location fails the batch without a single request. The remaining targets
    /// are then fetched concurrently; frames come back in target order.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoLocation`] for a target with neither station nor
    /// coordinates, and [`QueryError::Transport`] when a target's request still fails
    /// after its retries. Either error fails the whole batch; partial results are
    /// never returned.
    pub async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, DatasourceError> {
        if request.targets.is_empty() {
            return Ok(QueryResponse::default());
        }

        let range = request.zoned_range();
        let resolution = range.resolution();
        let planned = request
            .targets
            .iter()
            .cloned()
            .map(QueryTarget::normalized)
            .map(|target| {
                let api_request = route(&target, &range, resolution)?;
                Ok::<_, QueryError>((target, api_request))
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Querying {} targets at {} resolution ({} to {})",
            planned.len(),
            resolution,
            range.start_param(),
            range.end_param()
        );

        let data = try_join_all(
            planned
                .iter()
                .map(|(target, api_request)| self.run_target(target, api_request, resolution)),
        )
        .await?;

        Ok(QueryResponse { data })
    }

    async fn run_target(
        &self,
        target: &QueryTarget,
        api_request: &ApiRequest,
        resolution: Resolution,
    ) -> Result<DataFrame, QueryError> {
        let response: ApiResponse =
            self.fetcher
                .fetch(api_request)
                .await
                .map_err(|source| QueryError::Transport {
                    ref_id: target.ref_id.clone(),
                    source,
                })?;

        Ok(map_rows(
            &target.ref_id,
            &response.data,
            &target.properties,
            resolution,
        ))
    }

    /// Fetches the raw weather rows for a location.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.location(Location)`: **Required.** A station id or a coordinate.
    /// * `.range(DateRange)`: **Required.** The period to fetch.
    /// * `.resolution(Resolution)`: Optional. Defaults to the range's own resolution.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use meteostat_datasource::{DatasourceError, DatasourceSettings, MeteostatDatasource};
    /// # use meteostat_datasource::{DateRange, LatLon, Location, Resolution};
    /// # use chrono::NaiveDate;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), DatasourceError> {
    /// let datasource = MeteostatDatasource::new(
    ///     DatasourceSettings::builder().url("http://localhost:8080").build(),
    /// )?;
    /// let range = DateRange::from_dates(
    ///     NaiveDate::from_ymd_opt(2023, 7, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2023, 7, 31).unwrap(),
    /// );
    ///
    /// let response = datasource
    ///     .fetch_weather()
    ///     .location(Location::Point(LatLon(52.52, 13.40)))
    ///     .range(range)
    ///     .resolution(Resolution::Hourly)
    ///     .call()
    ///     .await?;
    /// println!("{} rows", response.data.len());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn fetch_weather(
        &self,
        location: Location,
        range: DateRange,
        resolution: Option<Resolution>,
    ) -> Result<ApiResponse, DatasourceError> {
        let resolution = resolution.unwrap_or_else(|| range.resolution());
        let api_request = ApiRequest::weather(&location, &range, resolution);
        Ok(self.fetcher.fetch(&api_request).await?)
    }

    /// Searches stations by free text and returns the API's result set unchanged.
    ///
    /// No filtering happens here; see [`crate::candidate_stations`] for the policy a
    /// selection widget applies on top.
    pub async fn search_stations(&self, term: &str) -> Result<StationSearchResponse, DatasourceError> {
        let api_request = ApiRequest::station_search(term);
        Ok(self.fetcher.fetch(&api_request).await?)
    }

    /// Checks that the API is reachable by fetching a day of hourly data for
    /// [`HEALTH_CHECK_STATION`]. The content of the response is not inspected.
    pub async fn test_datasource(&self) -> HealthCheck {
        let now = Utc::now();
        let api_request = ApiRequest::weather(
            &Location::Station(HEALTH_CHECK_STATION.to_string()),
            &DateRange::new(now - Duration::days(1), now),
            Resolution::Hourly,
        );
        let result = self.fetcher.fetch::<Value>(&api_request).await;

        match result {
            Ok(_) => {
                info!("Health check against station {} succeeded", HEALTH_CHECK_STATION);
                HealthCheck::success()
            }
            Err(e) => {
                error!("Health check failed: {}", e);
                HealthCheck::error(e.to_string())
            }
        }
    }
}
