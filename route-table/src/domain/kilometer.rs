//! Distance annotations attached to displayed rows.

use std::fmt;

use serde::{Serialize, Serializer};

use super::Row;

/// A displayed distance, or the marker for rows that cannot be measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kilometer {
    /// Distance in kilometres.
    Distance(f64),
    /// Coordinates missing or invalid, on this row or on the origin.
    Unavailable,
}

impl Kilometer {
    /// The distance, if available.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Distance(km) => Some(*km),
            Self::Unavailable => None,
        }
    }

    /// Whether this is the unavailable marker.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

impl fmt::Display for Kilometer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Distance(km) => write!(f, "{km:.2} km"),
            Self::Unavailable => f.write_str("N/A"),
        }
    }
}

impl Serialize for Kilometer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Distance(km) => serializer.serialize_f64(*km),
            Self::Unavailable => serializer.serialize_str("unavailable"),
        }
    }
}

/// A source row plus its computed distances.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedRow {
    #[serde(flatten)]
    pub row: Row,

    /// Distance shown in the table.
    pub kilometer: Kilometer,

    /// This row's contribution to the running total. Zero for the origin
    /// and for rows without coordinates.
    pub segment_distance: f64,
}

impl AnnotatedRow {
    /// Annotate a copy of `row`.
    pub fn new(row: Row, kilometer: Kilometer, segment_distance: f64) -> Self {
        Self {
            row,
            kilometer,
            segment_distance,
        }
    }

    /// Annotate a copy of `row` as unmeasurable.
    pub fn unavailable(row: Row) -> Self {
        Self::new(row, Kilometer::Unavailable, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Kilometer::Distance(111.1949).to_string(), "111.19 km");
        assert_eq!(Kilometer::Unavailable.to_string(), "N/A");
    }

    #[test]
    fn value() {
        assert_eq!(Kilometer::Distance(3.5).value(), Some(3.5));
        assert_eq!(Kilometer::Unavailable.value(), None);
        assert!(Kilometer::Unavailable.is_unavailable());
        assert!(!Kilometer::Distance(0.0).is_unavailable());
    }

    #[test]
    fn serialize_annotated_row() {
        let row = Row::new("1", "Shop", "R1");
        let annotated = AnnotatedRow::new(row.clone(), Kilometer::Distance(2.5), 2.5);
        let json = serde_json::to_value(&annotated).unwrap();
        assert_eq!(json["location"], "Shop");
        assert_eq!(json["kilometer"], 2.5);
        assert_eq!(json["segmentDistance"], 2.5);

        let json = serde_json::to_value(AnnotatedRow::unavailable(row)).unwrap();
        assert_eq!(json["kilometer"], "unavailable");
        assert_eq!(json["segmentDistance"], 0.0);
    }
}
