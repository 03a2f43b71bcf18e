//! Edits a query editor makes to a target.
//!
//! Each change in the editor form maps to one [`TargetEdit`]; applying it yields the
//! updated target, which the host then stores and runs.

use crate::types::property::{PropertyDescriptor, PROPERTIES};
use crate::types::station::StationOption;
use crate::types::target::QueryTarget;

/// One change made in the query editor.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetEdit {
    /// A station was picked, or the selection was cleared.
    SelectStation(Option<StationOption>),
    /// Raw text of the latitude input.
    Latitude(String),
    /// Raw text of the longitude input.
    Longitude(String),
    /// The property picker at `index` changed to `key`.
    SetProperty { index: usize, key: String },
    /// The property row at this index was removed.
    RemoveProperty(usize),
    /// A new, still empty, property row was added.
    AddProperty,
}

/// Parses coordinate input. Text that is not a finite number clears the value.
fn parse_coordinate(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

impl QueryTarget {
    /// Applies an editor change and returns the updated target.
    ///
    /// Property edits work on the target's properties as stored, before defaults
    /// are applied. Indices past the end are ignored, except that setting the
    /// property right after the last one appends it.
    ///
    /// # Examples
    ///
    /// ```
    /// use meteostat_datasource::{QueryTarget, TargetEdit};
    ///
    /// let target = QueryTarget::new("A")
    ///     .with_properties(["temp"])
    ///     .apply_edit(TargetEdit::AddProperty)
    ///     .apply_edit(TargetEdit::SetProperty { index: 1, key: "rhum".into() })
    ///     .apply_edit(TargetEdit::Latitude("52.52".into()));
    ///
    /// assert_eq!(target.properties, ["temp", "rhum"]);
    /// assert_eq!(target.latitude, Some(52.52));
    /// ```
    pub fn apply_edit(mut self, edit: TargetEdit) -> Self {
        match edit {
            TargetEdit::SelectStation(station) => self.station = station,
            TargetEdit::Latitude(text) => self.latitude = parse_coordinate(&text),
            TargetEdit::Longitude(text) => self.longitude = parse_coordinate(&text),
            TargetEdit::SetProperty { index, key } => {
                if let Some(property) = self.properties.get_mut(index) {
                    *property = key;
                } else if index == self.properties.len() {
                    self.properties.push(key);
                }
            }
            TargetEdit::RemoveProperty(index) => {
                if index < self.properties.len() {
                    self.properties.remove(index);
                }
            }
            TargetEdit::AddProperty => self.properties.push(String::new()),
        }
        self
    }
}

/// The properties a picker offers, in display order.
pub fn property_options() -> &'static [PropertyDescriptor] {
    PROPERTIES
}
