//! Turns a query target into the API request that serves it.
//!
//! Routing is a pure decision: it picks the station or point endpoint, appends the
//! resolution, and lays out the query parameters. Nothing here touches the network,
//! so a target without a location is rejected before any request is sent.

use crate::transport::QueryParam;
use crate::types::resolution::{DateRange, Resolution};
use crate::types::target::{LatLon, QueryTarget};
use crate::weather_data::error::QueryError;

/// API version prefix shared by all endpoints.
const API_VERSION: &str = "/v2";

/// Where a target's data comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// A Meteostat station id.
    Station(String),
    /// A coordinate, interpolated by the API from nearby stations.
    Point(LatLon),
}

impl Location {
    /// Picks the location of a target: its station when one is selected, otherwise
    /// its coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoLocation`] when the target has neither a station id
    /// nor a complete coordinate pair.
    pub fn resolve(target: &QueryTarget) -> Result<Location, QueryError> {
        if let Some(station) = target.station_id() {
            Ok(Location::Station(station.to_string()))
        } else if let Some(coordinates) = target.coordinates() {
            Ok(Location::Point(coordinates))
        } else {
            Err(QueryError::NoLocation {
                ref_id: target.ref_id.clone(),
            })
        }
    }

    fn path_segment(&self) -> &'static str {
        match self {
            Location::Station(_) => "stations",
            Location::Point(_) => "point",
        }
    }

    fn params(&self) -> Vec<QueryParam> {
        match self {
            Location::Station(id) => vec![("station", id.clone())],
            Location::Point(LatLon(lat, lon)) => vec![("lat", lat.to_string()), ("lon", lon.to_string())],
        }
    }
}

/// A routed API call: a path below the API root plus its query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub path: String,
    pub params: Vec<QueryParam>,
}

impl ApiRequest {
    /// The weather data request for `location` over `range`.
    ///
    /// # Examples
    ///
    /// ```
    /// use meteostat_datasource::{ApiRequest, DateRange, Location, Resolution};
    /// use chrono::NaiveDate;
    ///
    /// let range = DateRange::from_dates(
    ///     NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2020, 2, 3).unwrap(),
    /// );
    /// let request = ApiRequest::weather(&Location::Station("10637".into()), &range, Resolution::Hourly);
    /// assert_eq!(request.path, "/v2/stations/hourly");
    /// assert_eq!(request.param("start"), Some("2020-02-01"));
    /// ```
    pub fn weather(location: &Location, range: &DateRange, resolution: Resolution) -> Self {
        let mut params = location.params();
        params.push(("start", range.start_param()));
        params.push(("end", range.end_param()));

        Self {
            path: format!(
                "{}/{}/{}",
                API_VERSION,
                location.path_segment(),
                resolution.path_segment()
            ),
            params,
        }
    }

    /// The station search request for a free-text term.
    pub fn station_search(term: &str) -> Self {
        Self {
            path: format!("{}/stations/search", API_VERSION),
            params: vec![("query", term.to_string())],
        }
    }

    /// Value of the parameter named `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }
}

/// Routes a normalized target for a query over `range` at `resolution`.
pub fn route(
    target: &QueryTarget,
    range: &DateRange,
    resolution: Resolution,
) -> Result<ApiRequest, QueryError> {
    let location = Location::resolve(target)?;
    Ok(ApiRequest::weather(&location, range, resolution))
}
