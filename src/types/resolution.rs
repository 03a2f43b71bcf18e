//! Defines the queried time range and the data resolution derived from it.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use chrono_tz::Tz;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ranges spanning at least this many days are fetched as daily aggregates.
pub const DAILY_THRESHOLD_DAYS: i64 = 10;

/// Date format expected by the `start` and `end` API parameters.
pub(crate) const API_DATE_FORMAT: &str = "%Y-%m-%d";

/// The temporal granularity of the rows requested from the API.
///
/// # Examples
///
/// ```
/// use meteostat_datasource::Resolution;
///
/// assert_eq!(Resolution::Hourly.to_string(), "hourly");
/// assert_eq!(Resolution::Daily.path_segment(), "daily");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// One row per hour, timestamped by `time` (and `time_local` when available).
    Hourly,
    /// One row per day, keyed by `date`, with `tavg`/`tmin`/`tmax` temperature aggregates.
    Daily,
}

impl Resolution {
    pub fn path_segment(&self) -> &'static str {
        match self {
            Resolution::Hourly => "hourly",
            Resolution::Daily => "daily",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}

/// The timezone request dates are formatted in.
///
/// # Examples
///
/// ```
/// use meteostat_datasource::DisplayZone;
///
/// assert_eq!(DisplayZone::from_hint(Some("utc")), DisplayZone::Utc);
/// assert!(matches!(DisplayZone::from_hint(Some("+02:00")), DisplayZone::Fixed(_)));
/// assert!(matches!(DisplayZone::from_hint(Some("Europe/Berlin")), DisplayZone::Named(_)));
/// assert_eq!(DisplayZone::from_hint(Some("browser")), DisplayZone::Utc);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayZone {
    #[default]
    Utc,
    Fixed(FixedOffset),
    Named(Tz),
}

impl DisplayZone {
    /// Reads a dashboard timezone hint: `utc`, a fixed offset such as `+02:00`, or an
    /// IANA name such as `Europe/Berlin`. Anything else, including `browser` (which
    /// only the client can resolve), falls back to UTC.
    pub fn from_hint(hint: Option<&str>) -> Self {
        let Some(hint) = hint.map(str::trim).filter(|hint| !hint.is_empty()) else {
            return DisplayZone::Utc;
        };
        if hint.eq_ignore_ascii_case("utc") {
            DisplayZone::Utc
        } else if let Ok(offset) = hint.parse::<FixedOffset>() {
            DisplayZone::Fixed(offset)
        } else if let Ok(tz) = hint.parse::<Tz>() {
            DisplayZone::Named(tz)
        } else {
            debug!("Timezone hint '{}' not recognized, formatting dates in UTC", hint);
            DisplayZone::Utc
        }
    }

    fn format(&self, instant: &DateTime<Utc>) -> String {
        match self {
            DisplayZone::Utc => instant.format(API_DATE_FORMAT).to_string(),
            DisplayZone::Fixed(offset) => instant.with_timezone(offset).format(API_DATE_FORMAT).to_string(),
            DisplayZone::Named(tz) => instant.with_timezone(tz).format(API_DATE_FORMAT).to_string(),
        }
    }
}

/// The time range of a dashboard query.
///
/// The boundaries are instants; [`DateRange::in_zone`] picks the timezone whose
/// calendar dates become the `start` and `end` parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    #[serde(skip)]
    pub zone: DisplayZone,
}

impl DateRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from,
            to,
            zone: DisplayZone::Utc,
        }
    }

    /// A range covering whole days, from midnight of `start` to midnight of `end`.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(
            start.and_time(chrono::NaiveTime::MIN).and_utc(),
            end.and_time(chrono::NaiveTime::MIN).and_utc(),
        )
    }

    /// The same range, with dates formatted in `zone`.
    pub fn in_zone(self, zone: DisplayZone) -> Self {
        Self { zone, ..self }
    }

    pub fn span(&self) -> Duration {
        self.to - self.from
    }

    /// Picks the resolution for this range: daily once the span reaches
    /// [`DAILY_THRESHOLD_DAYS`], hourly otherwise (including inverted ranges).
    pub fn resolution(&self) -> Resolution {
        if self.span() >= Duration::days(DAILY_THRESHOLD_DAYS) {
            Resolution::Daily
        } else {
            Resolution::Hourly
        }
    }

    /// The `start` parameter value, e.g. `2020-02-01`.
    pub fn start_param(&self) -> String {
        self.zone.format(&self.from)
    }

    /// The `end` parameter value.
    pub fn end_param(&self) -> String {
        self.zone.format(&self.to)
    }
}
