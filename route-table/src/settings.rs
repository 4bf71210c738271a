//! Command-line settings read from the environment.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::domain::FilterState;
use crate::pipeline::PipelineConfig;

/// Path to the JSON row file.
pub const ROWS_VAR: &str = "ROUTE_TABLE_ROWS";
/// Free-text search term.
pub const SEARCH_VAR: &str = "ROUTE_TABLE_SEARCH";
/// Comma-separated routes to include.
pub const ROUTES_VAR: &str = "ROUTE_TABLE_ROUTES";
/// Comma-separated delivery tags to exclude.
pub const EXCLUDE_DELIVERY_VAR: &str = "ROUTE_TABLE_EXCLUDE_DELIVERY";
/// Origin location name override.
pub const ORIGIN_VAR: &str = "ROUTE_TABLE_ORIGIN";
/// Date override in YYYY-MM-DD form.
pub const DATE_VAR: &str = "ROUTE_TABLE_DATE";

/// Errors in the environment settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("ROUTE_TABLE_ROWS must name a JSON row file")]
    MissingRows,

    #[error("ROUTE_TABLE_DATE must be YYYY-MM-DD, got {0:?}")]
    InvalidDate(String),
}

/// Everything the binary needs for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub rows_path: PathBuf,
    pub filters: FilterState,
    pub pipeline: PipelineConfig,

    /// Fixed classification date; `None` uses the system clock.
    pub date: Option<NaiveDate>,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, which returns a variable's value.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let rows_path = get(ROWS_VAR)
            .map(PathBuf::from)
            .ok_or(SettingsError::MissingRows)?;

        let filters = FilterState {
            search_term: get(SEARCH_VAR).unwrap_or_default(),
            route_filters: get(ROUTES_VAR).map(|v| split_list(&v)).unwrap_or_default(),
            delivery_filters: get(EXCLUDE_DELIVERY_VAR)
                .map(|v| split_list(&v))
                .unwrap_or_default(),
        };

        let mut pipeline = PipelineConfig::default();
        if let Some(origin) = get(ORIGIN_VAR) {
            pipeline = pipeline.with_origin_name(origin.trim());
        }

        let date = get(DATE_VAR)
            .map(|v| {
                NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d")
                    .map_err(|_| SettingsError::InvalidDate(v))
            })
            .transpose()?;

        Ok(Self {
            rows_path,
            filters,
            pipeline,
            date,
        })
    }
}

/// Split a comma-separated list, dropping blank entries.
fn split_list<C: FromIterator<String>>(value: &str) -> C {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
