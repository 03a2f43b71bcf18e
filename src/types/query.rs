//! The batch query exchanged with the dashboard host.

use crate::types::data_frame::DataFrame;
use crate::types::resolution::{DateRange, DisplayZone};
use crate::types::target::QueryTarget;
use bon::Builder;
use serde::{Deserialize, Serialize};

/// A batch of targets sharing one time range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(default)]
    #[builder(default)]
    pub targets: Vec<QueryTarget>,
    pub range: DateRange,
    /// Timezone hint from the dashboard (e.g. `"utc"`, `"Europe/Berlin"`, `"+02:00"`).
    ///
    /// The `start` and `end` dates sent to the API are the range's calendar dates in
    /// this zone. `"browser"` cannot be resolved here and is treated as UTC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// One frame per target, in the order the targets were given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub data: Vec<DataFrame>,
}

impl QueryRequest {
    /// The range with its dates formatted in the hinted timezone.
    pub fn zoned_range(&self) -> DateRange {
        self.range.in_zone(DisplayZone::from_hint(self.timezone.as_deref()))
    }
}

impl QueryResponse {
    /// The frame produced for `ref_id`, if any.
    pub fn frame(&self, ref_id: &str) -> Option<&DataFrame> {
        self.data.iter().find(|frame| frame.ref_id == ref_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_host_request() {
        let request: QueryRequest = serde_json::from_str(
            r#"{
                "targets": [{"refId": "1", "station": {"id": "TEST_ID"}, "properties": ["temp"]}],
                "range": {"from": "2020-02-01T01:00:00Z", "to": "2020-02-03T01:00:00Z"},
                "timezone": "utc"
            }"#,
        )
        .unwrap();

        assert_eq!(request.targets.len(), 1);
        assert_eq!(request.timezone.as_deref(), Some("utc"));
        assert_eq!(request.range.start_param(), "2020-02-01");
    }

    #[test]
    fn timezone_hint_shifts_request_dates() {
        let request: QueryRequest = serde_json::from_str(
            r#"{
                "range": {"from": "2020-01-31T23:00:00Z", "to": "2020-02-02T23:00:00Z"},
                "timezone": "Europe/Amsterdam"
            }"#,
        )
        .unwrap();

        assert_eq!(request.range.start_param(), "2020-01-31");
        assert_eq!(request.zoned_range().start_param(), "2020-02-01");
        assert_eq!(request.zoned_range().end_param(), "2020-02-03");
    }

    #[test]
    fn targets_default_to_empty() {
        let request: QueryRequest = serde_json::from_str(
            r#"{"range": {"from": "2020-02-01T01:00:00Z", "to": "2020-02-03T01:00:00Z"}}"#,
        )
        .unwrap();
        assert!(request.targets.is_empty());
    }
}
