//! Row transformation pipeline.
//!
//! Turns the raw location rows plus the user's filter state into the exact
//! ordered, annotated rows the table displays:
//!
//! 1. Filter by route, search term and delivery exclusion
//! 2. Sort by the day's delivery priority
//! 3. Annotate distances, direct or cumulative depending on the filters
//!
//! The pipeline holds no state between runs. Each run depends only on the
//! rows, the filter state and the date.

mod annotate;
mod config;
mod filter;
mod sort;


use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::domain::{AnnotatedRow, FilterState, Row};
use crate::schedule::{Clock, classify};

pub use annotate::{DistanceMode, Origin, annotate_rows};
pub use config::{DEFAULT_ORIGIN_NAME, PipelineConfig};
pub use filter::filter_rows;
pub use sort::sort_rows;

/// Everything the table and its filter controls need from one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutput {
    /// Rows to display, in display order.
    pub rows: Vec<AnnotatedRow>,

    /// Distinct non-empty delivery tags of the unfiltered input.
    pub delivery_facets: Vec<String>,

    /// Distinct non-empty routes of the unfiltered input.
    pub route_facets: Vec<String>,

    /// How distances were computed.
    pub mode: DistanceMode,

    /// Whether an origin with valid coordinates anchored the distances.
    pub origin_found: bool,
}

impl PipelineOutput {
    /// Total travel distance along the displayed route.
    ///
    /// Only meaningful in cumulative mode; `None` in direct mode or when no
    /// origin was found.
    pub fn total_kilometers(&self) -> Option<f64> {
        if self.mode != DistanceMode::Cumulative || !self.origin_found {
            return None;
        }
        Some(self.rows.iter().map(|r| r.segment_distance).sum())
    }
}

/// The row pipeline for one deployment.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with the given configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline for `today`.
    ///
    /// The origin is looked up in the unfiltered `rows`, so it still anchors
    /// distances when a filter hides it from the table.
    pub fn run(&self, rows: &[Row], state: &FilterState, today: NaiveDate) -> PipelineOutput {
        let class = classify(today, &self.config.off_days);
        let mode = DistanceMode::for_filters(state);
        let origin = Origin::locate(rows, &self.config.origin_name);

        let filtered = filter_rows(rows, state);
        debug!(
            input = rows.len(),
            kept = filtered.len(),
            active_filters = state.active_filter_count(),
            "filtered rows"
        );

        let sorted = sort_rows(filtered, class);
        let annotated = annotate_rows(sorted, &origin, mode);

        PipelineOutput {
            rows: annotated,
            delivery_facets: distinct(rows.iter().map(|r| r.delivery.as_str())),
            route_facets: distinct(rows.iter().map(|r| r.route.as_str())),
            mode,
            origin_found: origin.coordinate().is_some(),
        }
    }

    /// Run the pipeline for the clock's current date.
    pub fn run_at<C: Clock + ?Sized>(
        &self,
        rows: &[Row],
        state: &FilterState,
        clock: &C,
    ) -> PipelineOutput {
        self.run(rows, state, clock.today())
    }
}

/// Distinct non-empty values in first-seen order.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| !value.is_empty() && seen.insert(*value))
        .map(str::to_string)
        .collect()
}
