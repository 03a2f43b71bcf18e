//! Shapes of the JSON bodies returned by the Meteostat point and station endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One timestamped record of an API response.
///
/// Hourly rows carry `time` (and `time_local` when a timezone was requested) next to
/// the weather fields; daily rows carry `date`, `tavg`, `tmin`, `tmax` and so on.
/// The set of keys differs per endpoint, so rows stay untyped.
pub type ApiRow = Map<String, Value>;

/// The body of a weather data response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    /// Rows in chronological order. The API sends `null` when there is no data.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<ApiRow>,
}

/// Deserializes a missing or `null` list as an empty one.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_hourly_body() {
        let response: ApiResponse = serde_json::from_value(json!({
            "meta": {"generated": "2020-02-04 10:00:00"},
            "data": [
                {"time": "2020-02-01 00:00:00", "temp": 21, "coco": null},
                {"time": "2020-02-01 01:00:00", "temp": 22.5}
            ]
        }))
        .unwrap();

        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[0]["temp"], json!(21));
        assert_eq!(response.data[0]["coco"], Value::Null);
        assert_eq!(response.data[1]["temp"], json!(22.5));
    }

    #[test]
    fn null_or_missing_data_is_empty() {
        let null_data: ApiResponse = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(null_data.data.is_empty());

        let no_data: ApiResponse = serde_json::from_value(json!({})).unwrap();
        assert!(no_data.data.is_empty());
    }

    #[test]
    fn rejects_non_object_rows() {
        let result = serde_json::from_value::<ApiResponse>(json!({"data": [1, 2]}));
        assert!(result.is_err());
    }
}
