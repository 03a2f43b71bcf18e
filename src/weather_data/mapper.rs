//! Reshapes API rows into a [`DataFrame`].

use crate::types::api_response::ApiRow;
use crate::types::data_frame::{DataFrame, Field, FieldKind};
use crate::types::property::PropertyDescriptor;
use crate::types::resolution::Resolution;
use log::debug;
use serde_json::Value;

/// Name of the time field, always the first field of a frame.
pub const TIME_FIELD: &str = "Time";

/// Row keys holding the timestamp, in order of preference. Hourly rows carry
/// `time_local` when the API was asked for local time, daily rows only `date`.
const TIME_KEYS: [&str; 3] = ["time_local", "time", "date"];

fn row_time(row: &ApiRow) -> Value {
    TIME_KEYS
        .iter()
        .find_map(|key| row.get(*key).filter(|value| !value.is_null()))
        .cloned()
        .unwrap_or(Value::Null)
}

fn column(rows: &[ApiRow], key: &str) -> Vec<Value> {
    rows.iter()
        .map(|row| row.get(key).cloned().unwrap_or(Value::Null))
        .collect()
}

/// Builds the frame for one target.
///
/// The frame starts with the time field, followed by one number field per requested
/// property in request order. Keys missing from the property registry are skipped,
/// and duplicate keys produce duplicate fields. With daily rows, temperature is
/// replaced in place by its average, minimum and maximum fields, since the daily
/// endpoints do not report a single temperature.
pub fn map_rows(
    ref_id: &str,
    rows: &[ApiRow],
    properties: &[String],
    resolution: Resolution,
) -> DataFrame {
    let mut fields = Vec::with_capacity(properties.len() + 1);
    fields.push(Field::new(
        TIME_FIELD,
        FieldKind::Time,
        rows.iter().map(row_time).collect(),
    ));

    for key in properties {
        let Some(property) = PropertyDescriptor::lookup(key) else {
            debug!("Skipping unknown property '{}' for target '{}'", key, ref_id);
            continue;
        };

        if resolution == Resolution::Daily && property.expands_daily() {
            fields.extend(
                property
                    .daily_sources
                    .iter()
                    .map(|source| Field::new(source.label, FieldKind::Number, column(rows, source.field))),
            );
        } else {
            fields.push(Field::new(property.label, FieldKind::Number, column(rows, property.key)));
        }
    }

    DataFrame {
        ref_id: ref_id.to_string(),
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: Value) -> Vec<ApiRow> {
        serde_json::from_value(value).unwrap()
    }

    fn hourly_rows() -> Vec<ApiRow> {
        rows(json!([
            {"time": "2020-02-01 00:00:00", "temp": 21, "dwpt": 17, "rhum": 78},
            {"time": "2020-02-01 01:00:00", "temp": 22, "dwpt": 16, "rhum": 77}
        ]))
    }

    fn daily_rows() -> Vec<ApiRow> {
        rows(json!([
            {"date": "2020-02-01", "tavg": 18.5, "tmin": 12, "tmax": 22, "dwpt": 17, "rhum": 78},
            {"date": "2020-02-11", "tavg": 18, "tmin": 14, "tmax": 24, "dwpt": 16, "rhum": 77}
        ]))
    }

    fn props(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|key| key.to_string()).collect()
    }

    #[test]
    fn hourly_temperature() {
        let frame = map_rows("1", &hourly_rows(), &props(&["temp"]), Resolution::Hourly);

        assert_eq!(frame.ref_id, "1");
        assert_eq!(frame.fields.len(), 2);
        assert_eq!(frame.fields[0].kind, FieldKind::Time);
        assert_eq!(
            frame.fields[0].values,
            [json!("2020-02-01 00:00:00"), json!("2020-02-01 01:00:00")]
        );
        assert_eq!(frame.fields[1].name, "Temperature (°C)");
        assert_eq!(frame.fields[1].kind, FieldKind::Number);
        assert_eq!(frame.fields[1].values, [json!(21), json!(22)]);
    }

    #[test]
    fn daily_temperature_expands_into_three_fields() {
        let frame = map_rows("1", &daily_rows(), &props(&["temp"]), Resolution::Daily);

        assert_eq!(
            frame.field_names(),
            [
                "Time",
                "Average Temperature (°C)",
                "Minimum Temperature (°C)",
                "Maximum Temperature (°C)"
            ]
        );
        assert_eq!(frame.fields[0].values, [json!("2020-02-01"), json!("2020-02-11")]);
        assert_eq!(frame.fields[1].values, [json!(18.5), json!(18)]);
        assert_eq!(frame.fields[2].values, [json!(12), json!(14)]);
        assert_eq!(frame.fields[3].values, [json!(22), json!(24)]);
        assert!(frame.fields[1..].iter().all(|f| f.kind == FieldKind::Number));
    }

    #[test]
    fn expansion_happens_in_place() {
        let frame = map_rows("1", &daily_rows(), &props(&["rhum", "temp", "dwpt"]), Resolution::Daily);
        assert_eq!(
            frame.field_names(),
            [
                "Time",
                "Relative Humidity (%)",
                "Average Temperature (°C)",
                "Minimum Temperature (°C)",
                "Maximum Temperature (°C)",
                "Dew Point (°C)"
            ]
        );
    }

    #[test]
    fn unknown_properties_are_skipped() {
        let frame = map_rows("1", &hourly_rows(), &props(&["bogus", "", "rhum"]), Resolution::Hourly);
        assert_eq!(frame.field_names(), ["Time", "Relative Humidity (%)"]);
    }

    #[test]
    fn duplicates_are_kept() {
        let frame = map_rows("1", &hourly_rows(), &props(&["temp", "temp"]), Resolution::Hourly);
        assert_eq!(frame.field_names(), ["Time", "Temperature (°C)", "Temperature (°C)"]);
    }

    #[test]
    fn missing_values_become_null() {
        let frame = map_rows("1", &hourly_rows(), &props(&["snow", "dwpt"]), Resolution::Hourly);
        assert_eq!(frame.fields[1].values, [Value::Null, Value::Null]);
        assert_eq!(frame.fields[2].values, [json!(17), json!(16)]);
    }

    #[test]
    fn local_time_is_preferred() {
        let rows = rows(json!([
            {"time": "2020-02-01 00:00:00", "time_local": "2020-02-01 01:00:00", "temp": 1},
            {"time": "2020-02-01 01:00:00", "time_local": null, "temp": 2},
            {"temp": 3}
        ]));
        let frame = map_rows("1", &rows, &props(&["temp"]), Resolution::Hourly);
        assert_eq!(
            frame.fields[0].values,
            [json!("2020-02-01 01:00:00"), json!("2020-02-01 01:00:00"), Value::Null]
        );
    }

    #[test]
    fn all_fields_match_row_count() {
        let frame = map_rows(
            "1",
            &daily_rows(),
            &props(&["temp", "prcp", "wspd", "coco"]),
            Resolution::Daily,
        );
        assert!(frame.fields.iter().all(|field| field.values.len() == 2));
        assert_eq!(frame.len(), 2);
    }

    #[test]
    fn no_rows_gives_empty_fields() {
        let frame = map_rows("1", &[], &props(&["temp"]), Resolution::Hourly);
        assert_eq!(frame.field_names(), ["Time", "Temperature (°C)"]);
        assert!(frame.is_empty());
    }
}
