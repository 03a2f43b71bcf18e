//! Query targets as sent by the dashboard host, and their normalization.

use crate::types::property::DEFAULT_PROPERTY;
use crate::types::station::StationOption;
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use meteostat_datasource::LatLon;
///
/// let berlin_center = LatLon(52.5200, 13.4050);
/// assert_eq!(berlin_center.0, 52.5200); // Latitude
/// assert_eq!(berlin_center.1, 13.4050); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// One requested weather series within a batch query.
///
/// A target locates its data either by station (the `station` selection, or the
/// older flat `stationId` field) or by a latitude/longitude pair. Which one is
/// used is decided when the query runs, see [`crate::Location::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryTarget {
    /// Caller-assigned correlation id, echoed on the resulting frame.
    pub ref_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<StationOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Requested property keys, in output order. May hold unknown keys or duplicates.
    #[serde(default)]
    pub properties: Vec<String>,
}

impl QueryTarget {
    pub fn new(ref_id: impl Into<String>) -> Self {
        Self {
            ref_id: ref_id.into(),
            ..Self::default()
        }
    }

    pub fn with_station(mut self, id: impl Into<String>) -> Self {
        self.station = Some(StationOption::from_id(id));
        self
    }

    pub fn with_coordinates(mut self, location: LatLon) -> Self {
        self.latitude = Some(location.0);
        self.longitude = Some(location.1);
        self
    }

    pub fn with_properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties = properties.into_iter().map(Into::into).collect();
        self
    }

    /// Fills in defaults: a target without properties requests temperature.
    ///
    /// Location fields are left untouched; a target without any location is only
    /// rejected once the query is routed.
    pub fn normalized(mut self) -> Self {
        if self.properties.is_empty() {
            self.properties = vec![DEFAULT_PROPERTY.to_string()];
        }
        self
    }

    /// The selected station id, ignoring empty ids.
    pub fn station_id(&self) -> Option<&str> {
        self.station
            .as_ref()
            .and_then(StationOption::id)
            .or_else(|| self.station_id.as_deref().filter(|id| !id.is_empty()))
    }

    /// The coordinate pair, when both halves are present and finite.
    pub fn coordinates(&self) -> Option<LatLon> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Some(LatLon(lat, lon)),
            _ => None,
        }
    }
}
