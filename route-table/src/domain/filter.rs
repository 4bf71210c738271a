//! User-selected filter and search state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Filter controls owned by the presentation layer.
///
/// Passed into every pipeline run; the pipeline never keeps a copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// Free text, matched case-insensitively against every field.
    pub search_term: String,

    /// Route labels to include. Empty means every route.
    pub route_filters: BTreeSet<String>,

    /// Delivery-type tags to exclude. Empty means nothing is excluded.
    pub delivery_filters: BTreeSet<String>,
}

impl FilterState {
    /// Create an empty filter state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Add a route to the inclusion set.
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route_filters.insert(route.into());
        self
    }

    /// Add a delivery tag to the exclusion set.
    pub fn excluding_delivery(mut self, delivery: impl Into<String>) -> Self {
        self.delivery_filters.insert(delivery.into());
        self
    }

    /// Whether any control narrows the table.
    ///
    /// Decided from the controls themselves, never from how many rows
    /// survive filtering.
    pub fn has_active_filters(&self) -> bool {
        !self.search_term.is_empty()
            || !self.route_filters.is_empty()
            || !self.delivery_filters.is_empty()
    }

    /// Number of active selections, for the filter badge.
    ///
    /// A non-empty search term counts once; every selected route and every
    /// excluded delivery tag counts once.
    pub fn active_filter_count(&self) -> usize {
        usize::from(!self.search_term.is_empty())
            + self.route_filters.len()
            + self.delivery_filters.len()
    }
}
