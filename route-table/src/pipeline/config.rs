//! Pipeline configuration.

use chrono::Weekday;

/// Location name of the depot in the reference deployment.
pub const DEFAULT_ORIGIN_NAME: &str = "QL Kitchen";

/// Deployment constants for the row pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Location name identifying the origin row.
    pub origin_name: String,

    /// Weekly off days, on which alternating groups are not served.
    pub off_days: Vec<Weekday>,
}

impl PipelineConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(origin_name: impl Into<String>, off_days: Vec<Weekday>) -> Self {
        Self {
            origin_name: origin_name.into(),
            off_days,
        }
    }

    /// Replace the origin name.
    pub fn with_origin_name(mut self, origin_name: impl Into<String>) -> Self {
        self.origin_name = origin_name.into();
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            origin_name: DEFAULT_ORIGIN_NAME.to_string(),
            off_days: vec![Weekday::Fri, Weekday::Sat],
        }
    }
}
