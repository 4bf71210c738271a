//! Geographic coordinate type.

use std::fmt;

use serde::Serialize;

/// A latitude/longitude pair in signed decimal degrees.
///
/// Both components are guaranteed finite. No range check is applied:
/// a latitude of 120 is accepted, matching how the source data is stored.
///
/// # Examples
///
/// ```
/// use route_table::domain::Coordinate;
///
/// let c = Coordinate::parse(Some("25.2854"), Some("51.5310")).unwrap();
/// assert_eq!(c.lat(), 25.2854);
///
/// // Missing or malformed components yield no coordinate
/// assert!(Coordinate::parse(None, Some("51.5")).is_none());
/// assert!(Coordinate::parse(Some("abc"), Some("51.5")).is_none());
/// assert!(Coordinate::parse(Some("NaN"), Some("51.5")).is_none());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Create a coordinate from numeric components.
    ///
    /// Returns `None` if either component is not finite.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        if lat.is_finite() && lon.is_finite() {
            Some(Self { lat, lon })
        } else {
            None
        }
    }

    /// Parse a coordinate from optional decimal strings.
    ///
    /// Surrounding whitespace is ignored. Absent, empty, unparsable and
    /// non-finite components all yield `None`.
    pub fn parse(lat: Option<&str>, lon: Option<&str>) -> Option<Self> {
        let lat = parse_component(lat?)?;
        let lon = parse_component(lon?)?;
        Self::new(lat, lon)
    }

    /// Latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

fn parse_component(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.lat, self.lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lon)
    }
}
