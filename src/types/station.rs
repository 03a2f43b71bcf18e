//! Data structures for Meteostat station search results and for the station
//! selection stored on a query target.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A weather station as returned by the `/v2/stations/search` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationDescriptor {
    /// The unique Meteostat station identifier (e.g., "10637").
    pub id: String,
    /// Station names keyed by language code (e.g., {"en": "Frankfurt Airport"}).
    #[serde(default)]
    pub name: HashMap<String, String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    /// National station identifier, if available.
    #[serde(default)]
    pub national: Option<String>,
    /// World Meteorological Organization (WMO) identifier, if available.
    #[serde(default)]
    pub wmo: Option<String>,
    /// ICAO airport code, if the station is at an airport.
    #[serde(default)]
    pub icao: Option<String>,
    #[serde(default)]
    pub iata: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation above sea level in meters, if available.
    #[serde(default)]
    pub elevation: Option<i32>,
    /// IANA timezone name (e.g., "Europe/Berlin"), if available.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Whether the station still reports data.
    #[serde(default)]
    pub active: bool,
}

impl StationDescriptor {
    /// The English station name, if the API provided one.
    pub fn english_name(&self) -> Option<&str> {
        self.name.get("en").map(String::as_str)
    }
}

/// The body of a station search response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationSearchResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    /// Matching stations. The API sends `null` when nothing matches.
    #[serde(default, deserialize_with = "crate::types::api_response::null_as_empty")]
    pub data: Vec<StationDescriptor>,
}

/// A station picked in a selection widget, as stored on a query target.
///
/// Hosts store whatever their selection widget produced, so every part is optional;
/// [`StationOption::id`] falls back from `id` to `value`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl StationOption {
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Builds the option a selection widget shows for a search result.
    pub fn from_descriptor(station: &StationDescriptor) -> Self {
        Self {
            label: Some(
                station
                    .english_name()
                    .unwrap_or(station.id.as_str())
                    .to_string(),
            ),
            value: Some(station.id.clone()),
            id: Some(station.id.clone()),
        }
    }

    /// The selected station id. Empty strings count as unset, so an empty `id`
    /// falls back to `value`.
    pub fn id(&self) -> Option<&str> {
        let non_empty = |id: &&str| !id.is_empty();
        self.id
            .as_deref()
            .filter(non_empty)
            .or_else(|| self.value.as_deref().filter(non_empty))
    }
}
