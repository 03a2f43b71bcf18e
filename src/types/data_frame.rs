//! The tabular output handed back to the dashboard host.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The kind of values held by a [`Field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Timestamps or dates, passed through as the API formats them.
    Time,
    /// Numeric weather measurements. Missing measurements are `null`.
    Number,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Time => write!(f, "time"),
            FieldKind::Number => write!(f, "number"),
        }
    }
}

/// One named column of a [`DataFrame`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub values: Vec<Value>,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }
}

/// The result for a single query target.
///
/// The first field is always the time axis, and every field holds exactly one
/// value per API row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFrame {
    pub ref_id: String,
    pub fields: Vec<Field>,
}

impl DataFrame {
    /// Number of rows, taken from the time field.
    pub fn len(&self) -> usize {
        self.fields.first().map_or(0, |field| field.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds a field by exact name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Field names in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_in_host_shape() {
        let frame = DataFrame {
            ref_id: "A".to_string(),
            fields: vec![
                Field::new("Time", FieldKind::Time, vec![json!("2020-02-01")]),
                Field::new("Snow (mm)", FieldKind::Number, vec![Value::Null]),
            ],
        };

        assert_eq!(
            serde_json::to_value(&frame).unwrap(),
            json!({
                "refId": "A",
                "fields": [
                    {"name": "Time", "type": "time", "values": ["2020-02-01"]},
                    {"name": "Snow (mm)", "type": "number", "values": [null]}
                ]
            })
        );
        assert_eq!(frame.len(), 1);
        assert_eq!(frame.field_names(), ["Time", "Snow (mm)"]);
    }

    #[test]
    fn frame_without_fields_is_empty() {
        let frame = DataFrame {
            ref_id: "A".to_string(),
            fields: Vec::new(),
        };
        assert!(frame.is_empty());
        assert!(frame.field("Time").is_none());
    }
}
