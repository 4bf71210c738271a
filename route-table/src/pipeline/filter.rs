//! Route, search and delivery filters.

use tracing::trace;

use crate::domain::{FilterState, Row};

/// Apply the filter controls to `rows`.
///
/// Steps run in a fixed order, each on the previous step's output:
/// 1. Route inclusion
/// 2. Free-text search
/// 3. Delivery exclusion
///
/// Input order is preserved. Returned rows are copies; an empty result is
/// valid.
pub fn filter_rows(rows: &[Row], state: &FilterState) -> Vec<Row> {
    let mut kept: Vec<&Row> = rows.iter().collect();

    if !state.route_filters.is_empty() {
        kept.retain(|row| state.route_filters.contains(&row.route));
        trace!(remaining = kept.len(), "applied route filter");
    }

    if !state.search_term.is_empty() {
        kept.retain(|row| row.matches_search(&state.search_term));
        trace!(remaining = kept.len(), "applied search filter");
    }

    if !state.delivery_filters.is_empty() {
        kept.retain(|row| !state.delivery_filters.contains(&row.delivery));
        trace!(remaining = kept.len(), "applied delivery exclusion");
    }

    kept.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Row> {
        vec![
            Row::new("1", "QL Kitchen", "Depot"),
            Row::new("2", "Corner Bakery", "North").with_delivery("Frozen"),
            Row::new("3", "Harbour Cafe", "South").with_delivery("Chilled"),
            Row::new("4", "North Deli", "North").with_delivery("Chilled"),
            Row::new("5", "Airport Kiosk", "East"),
        ]
    }

    fn ids(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn no_filters_keeps_everything() {
        let out = filter_rows(&rows(), &FilterState::new());
        assert_eq!(ids(&out), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn route_inclusion() {
        let state = FilterState::new().with_route("North").with_route("East");
        let out = filter_rows(&rows(), &state);
        assert_eq!(ids(&out), vec!["2", "4", "5"]);
    }

    #[test]
    fn search_any_field() {
        // "north" matches route of 2 and 4 and the location of 4
        let state = FilterState::new().with_search("NORTH");
        let out = filter_rows(&rows(), &state);
        assert_eq!(ids(&out), vec!["2", "4"]);
    }

    #[test]
    fn delivery_exclusion() {
        let state = FilterState::new().excluding_delivery("Chilled");
        let out = filter_rows(&rows(), &state);
        assert_eq!(ids(&out), vec!["1", "2", "5"]);
    }

    #[test]
    fn empty_delivery_can_be_excluded() {
        let state = FilterState::new().excluding_delivery("");
        let out = filter_rows(&rows(), &state);
        assert_eq!(ids(&out), vec!["2", "3", "4"]);
    }

    #[test]
    fn combined_filters() {
        let state = FilterState::new()
            .with_route("North")
            .with_route("South")
            .with_search("c")
            .excluding_delivery("Frozen");
        let out = filter_rows(&rows(), &state);
        // Bakery is excluded as Frozen; Cafe and the Chilled deli contain "c"
        assert_eq!(ids(&out), vec!["3", "4"]);
    }

    #[test]
    fn empty_result_is_valid() {
        let state = FilterState::new().with_route("Nowhere");
        assert!(filter_rows(&rows(), &state).is_empty());
        assert!(filter_rows(&[], &FilterState::new()).is_empty());
    }
}
