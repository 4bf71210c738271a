//! Location row types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Coordinate;

/// Error returned when parsing an unknown delivery alternation tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid delivery alternation: {value:?}")]
pub struct InvalidDeliveryAlt {
    value: String,
}

/// A row's recurring delivery schedule class.
///
/// # Examples
///
/// ```
/// use route_table::domain::DeliveryAlt;
///
/// assert_eq!(DeliveryAlt::parse("alt1").unwrap(), DeliveryAlt::Alt1);
/// assert_eq!(DeliveryAlt::parse(" Inactive ").unwrap(), DeliveryAlt::Inactive);
/// assert!(DeliveryAlt::parse("weekly").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryAlt {
    /// Delivered every day, off days included.
    #[default]
    Daily,
    /// Alternating group delivered on odd days of the month.
    Alt1,
    /// Alternating group delivered on even days of the month.
    Alt2,
    /// Not currently delivered.
    Inactive,
}

impl DeliveryAlt {
    /// Parse a tag, ignoring surrounding whitespace and ASCII case.
    pub fn parse(s: &str) -> Result<Self, InvalidDeliveryAlt> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "alt1" => Ok(Self::Alt1),
            "alt2" => Ok(Self::Alt2),
            "inactive" => Ok(Self::Inactive),
            _ => Err(InvalidDeliveryAlt {
                value: s.to_string(),
            }),
        }
    }

    /// Returns the canonical tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Alt1 => "alt1",
            Self::Alt2 => "alt2",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for DeliveryAlt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque, stable row identifier.
///
/// Stored as text; numeric identifiers in source data are kept in their
/// decimal form.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Create a row identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for RowId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::String(s) => Ok(Self(s)),
            Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "row id must be a string or number, got {other}"
            ))),
        }
    }
}

impl fmt::Debug for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RowId({})", self.0)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One stop in the route table.
///
/// Rows are never mutated by the pipeline. Fields other than the ones named
/// here are kept verbatim in `extra` for display and search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: RowId,

    /// Location name.
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: String,

    /// Route label.
    #[serde(default, deserialize_with = "lenient_text")]
    pub route: String,

    /// Delivery-type tag, may be empty.
    #[serde(default, deserialize_with = "lenient_text")]
    pub delivery: String,

    /// Raw alternation tag as stored. See [`Row::alternation`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_alt: Option<String>,

    /// Latitude as a decimal string.
    #[serde(
        default,
        deserialize_with = "lenient_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub latitude: Option<String>,

    /// Longitude as a decimal string.
    #[serde(
        default,
        deserialize_with = "lenient_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub longitude: Option<String>,

    /// Additional display fields, opaque to the pipeline.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Row {
    /// Create a row with the given identity, location and route.
    pub fn new(id: impl Into<String>, location: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            id: RowId::new(id),
            location: location.into(),
            route: route.into(),
            delivery: String::new(),
            delivery_alt: None,
            latitude: None,
            longitude: None,
            extra: BTreeMap::new(),
        }
    }

    /// Set the delivery-type tag.
    pub fn with_delivery(mut self, delivery: impl Into<String>) -> Self {
        self.delivery = delivery.into();
        self
    }

    /// Set the raw alternation tag.
    pub fn with_delivery_alt(mut self, alt: impl Into<String>) -> Self {
        self.delivery_alt = Some(alt.into());
        self
    }

    /// Set latitude and longitude from decimal strings.
    pub fn with_coordinates(mut self, lat: impl Into<String>, lon: impl Into<String>) -> Self {
        self.latitude = Some(lat.into());
        self.longitude = Some(lon.into());
        self
    }

    /// Add an extra display field.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// The parsed alternation class.
    ///
    /// Absent and unrecognised tags are treated as [`DeliveryAlt::Daily`].
    pub fn alternation(&self) -> DeliveryAlt {
        self.delivery_alt
            .as_deref()
            .and_then(|s| DeliveryAlt::parse(s).ok())
            .unwrap_or_default()
    }

    /// The row's coordinate, if both components are present and numeric.
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::parse(self.latitude.as_deref(), self.longitude.as_deref())
    }

    /// Check whether any field value contains `term`, ignoring case.
    ///
    /// An empty term matches every row.
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.field_values()
            .any(|value| value.to_lowercase().contains(&needle))
    }

    /// Stringified values of every field, identity included.
    fn field_values(&self) -> impl Iterator<Item = String> + '_ {
        let named = [
            Some(self.id.as_str()),
            Some(self.location.as_str()),
            Some(self.route.as_str()),
            Some(self.delivery.as_str()),
            self.delivery_alt.as_deref(),
            self.latitude.as_deref(),
            self.longitude.as_deref(),
        ];
        named
            .into_iter()
            .flatten()
            .map(str::to_string)
            .chain(self.extra.values().filter_map(stringify))
    }
}

/// Render an extra field for searching. Nulls have no text.
fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Accept strings, numbers, booleans or null for a text field.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a scalar, got {other}"
        ))),
    }
}

/// Accept a decimal given as a string or a number. Anything else is absent.
fn lenient_decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_tags() {
        assert_eq!(DeliveryAlt::parse("daily").unwrap(), DeliveryAlt::Daily);
        assert_eq!(DeliveryAlt::parse("alt1").unwrap(), DeliveryAlt::Alt1);
        assert_eq!(DeliveryAlt::parse("ALT2").unwrap(), DeliveryAlt::Alt2);
        assert_eq!(
            DeliveryAlt::parse("inactive").unwrap(),
            DeliveryAlt::Inactive
        );
    }

    #[test]
    fn reject_unknown_tag() {
        let err = DeliveryAlt::parse("weekly").unwrap_err();
        assert_eq!(err.to_string(), "invalid delivery alternation: \"weekly\"");
        assert!(DeliveryAlt::parse("").is_err());
    }

    #[test]
    fn alternation_defaults_to_daily() {
        let row = Row::new("1", "Shop", "R1");
        assert_eq!(row.alternation(), DeliveryAlt::Daily);

        let row = row.with_delivery_alt("fortnightly");
        assert_eq!(row.alternation(), DeliveryAlt::Daily);
    }

    #[test]
    fn alternation_parses_tag() {
        let row = Row::new("1", "Shop", "R1").with_delivery_alt("inactive");
        assert_eq!(row.alternation(), DeliveryAlt::Inactive);
    }

    #[test]
    fn coordinate_from_strings() {
        let row = Row::new("1", "Shop", "R1").with_coordinates("25.1", "51.2");
        let c = row.coordinate().unwrap();
        assert_eq!(c.lat(), 25.1);
        assert_eq!(c.lon(), 51.2);

        let row = Row::new("2", "Shop", "R1").with_coordinates("", "51.2");
        assert!(row.coordinate().is_none());
        assert!(Row::new("3", "Shop", "R1").coordinate().is_none());
    }

    #[test]
    fn search_is_case_insensitive_over_all_fields() {
        let row = Row::new("abc-7", "Corner Bakery", "North")
            .with_delivery("Frozen")
            .with_extra("contact", "Mr Smith")
            .with_extra("boxes", 12);

        assert!(row.matches_search("bakery"));
        assert!(row.matches_search("NORTH"));
        assert!(row.matches_search("froz"));
        assert!(row.matches_search("smith"));
        assert!(row.matches_search("12"));
        assert!(row.matches_search("ABC-7"));
        assert!(!row.matches_search("south"));
    }

    #[test]
    fn empty_search_matches() {
        assert!(Row::new("1", "Shop", "R1").matches_search(""));
    }

    #[test]
    fn null_extras_do_not_match_null_text() {
        let row = Row::new("1", "Shop", "R1").with_extra("note", Value::Null);
        assert!(!row.matches_search("null"));
    }

    #[test]
    fn deserialize_row_with_mixed_types() {
        let json = r#"{
            "id": 42,
            "location": "QL Kitchen",
            "route": "R1",
            "delivery": null,
            "deliveryAlt": "alt2",
            "latitude": 25.28,
            "longitude": "51.53",
            "phone": "555-0100",
            "crates": 3
        }"#;

        let row: Row = serde_json::from_str(json).unwrap();
        assert_eq!(row.id.as_str(), "42");
        assert_eq!(row.location, "QL Kitchen");
        assert_eq!(row.delivery, "");
        assert_eq!(row.alternation(), DeliveryAlt::Alt2);
        assert_eq!(row.latitude.as_deref(), Some("25.28"));
        assert_eq!(row.longitude.as_deref(), Some("51.53"));
        assert_eq!(row.extra.get("phone"), Some(&Value::from("555-0100")));
        assert_eq!(row.extra.get("crates"), Some(&Value::from(3)));
    }

    #[test]
    fn deserialize_minimal_row() {
        let row: Row = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert_eq!(row.location, "");
        assert!(row.delivery_alt.is_none());
        assert!(row.coordinate().is_none());
        assert!(row.extra.is_empty());
    }

    #[test]
    fn reject_structured_id() {
        assert!(serde_json::from_str::<Row>(r#"{"id": [1]}"#).is_err());
    }

    #[test]
    fn serialize_keeps_extras_at_top_level() {
        let row = Row::new("1", "Shop", "R1")
            .with_delivery_alt("alt1")
            .with_extra("phone", "555");
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["deliveryAlt"], "alt1");
        assert_eq!(json["phone"], "555");
        assert!(json.get("latitude").is_none());
    }
}
