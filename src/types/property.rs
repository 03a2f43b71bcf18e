//! The static registry of weather properties a target can request.
//!
//! Each entry maps a Meteostat column key (e.g. `"temp"`) to the label used for the
//! resulting data frame field. The registry is a `static` slice, so it is built at
//! compile time and shared read-only between concurrent queries.

use crate::types::data_frame::FieldKind;

/// The property requested when a target does not name any.
pub const DEFAULT_PROPERTY: &str = "temp";

/// A single field a property expands into for daily data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSource {
    /// Key of the value in a daily API row.
    pub field: &'static str,
    /// Name of the resulting data frame field.
    pub label: &'static str,
}

/// Describes one requestable weather property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Key used in query targets and in hourly API rows.
    pub key: &'static str,
    /// Display label, also used as the data frame field name.
    pub label: &'static str,
    /// Kind of the values this property produces.
    pub kind: FieldKind,
    /// Replacement fields for daily resolution.
    ///
    /// Empty for every property except temperature: the daily endpoints report
    /// `tavg`/`tmin`/`tmax` instead of a single `temp` value, so a requested
    /// temperature becomes three fields when the range is daily.
    pub daily_sources: &'static [ColumnSource],
}

impl PropertyDescriptor {
    /// Looks up a property by its key. Unknown keys yield `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use meteostat_datasource::PropertyDescriptor;
    ///
    /// assert_eq!(PropertyDescriptor::lookup("rhum").unwrap().label, "Relative Humidity (%)");
    /// assert!(PropertyDescriptor::lookup("humidity").is_none());
    /// ```
    pub fn lookup(key: &str) -> Option<&'static PropertyDescriptor> {
        PROPERTIES.iter().find(|property| property.key == key)
    }

    /// Whether this property expands into several fields for daily data.
    pub fn expands_daily(&self) -> bool {
        !self.daily_sources.is_empty()
    }
}

const DAILY_TEMPERATURE: &[ColumnSource] = &[
    ColumnSource {
        field: "tavg",
        label: "Average Temperature (°C)",
    },
    ColumnSource {
        field: "tmin",
        label: "Minimum Temperature (°C)",
    },
    ColumnSource {
        field: "tmax",
        label: "Maximum Temperature (°C)",
    },
];

const fn number(key: &'static str, label: &'static str) -> PropertyDescriptor {
    PropertyDescriptor {
        key,
        label,
        kind: FieldKind::Number,
        daily_sources: &[],
    }
}

/// All known properties, in the order a property picker lists them.
pub static PROPERTIES: &[PropertyDescriptor] = &[
    PropertyDescriptor {
        key: "temp",
        label: "Temperature (°C)",
        kind: FieldKind::Number,
        daily_sources: DAILY_TEMPERATURE,
    },
    number("rhum", "Relative Humidity (%)"),
    number("dwpt", "Dew Point (°C)"),
    number("prcp", "Precipitation (mm)"),
    number("snow", "Snow (mm)"),
    number("wdir", "Wind Direction (°)"),
    number("wspd", "Wind Speed (km/h)"),
    number("wpgt", "Peak Wind Gust (km/h)"),
    number("pres", "Sea Level Air Pressure (hPa)"),
    number("tsun", "One Hour Total Sunshine (minutes)"),
    number("coco", "Weather Condition Code"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_property_is_registered() {
        let property = PropertyDescriptor::lookup(DEFAULT_PROPERTY).unwrap();
        assert_eq!(property.label, "Temperature (°C)");
        assert!(property.expands_daily());
    }

    #[test]
    fn keys_are_unique() {
        let keys: HashSet<_> = PROPERTIES.iter().map(|p| p.key).collect();
        assert_eq!(keys.len(), PROPERTIES.len());
    }

    #[test]
    fn only_temperature_expands() {
        let expanding: Vec<_> = PROPERTIES
            .iter()
            .filter(|p| p.expands_daily())
            .map(|p| p.key)
            .collect();
        assert_eq!(expanding, ["temp"]);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(PropertyDescriptor::lookup("TEMP").is_none());
        assert!(PropertyDescriptor::lookup("").is_none());
    }
}
