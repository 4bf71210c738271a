//! Distance annotation along the displayed sequence.
//!
//! An unfiltered table is a set of spokes from the depot, so each stop shows
//! its own distance from the origin. A filtered table is read as a candidate
//! route, so each stop shows the running travel distance along the displayed
//! order.

use serde::Serialize;
use tracing::debug;

use crate::domain::{AnnotatedRow, Coordinate, FilterState, Kilometer, Row};
use crate::geo::distance;

/// How distances are attached to rows. Chosen once per pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMode {
    /// Each row measured independently from the origin.
    Direct,
    /// Running total along the displayed sequence.
    Cumulative,
}

impl DistanceMode {
    /// Select the mode from the filter controls.
    ///
    /// Any active control selects [`DistanceMode::Cumulative`], even when the
    /// filtered set happens to equal the full set.
    pub fn for_filters(state: &FilterState) -> Self {
        if state.has_active_filters() {
            Self::Cumulative
        } else {
            Self::Direct
        }
    }
}

/// The depot row that anchors all distances.
///
/// Identified by location name. Rows sharing that name are all treated as
/// the origin; the first one found supplies the coordinate.
#[derive(Debug, Clone, Copy)]
pub struct Origin<'a> {
    name: &'a str,
    coordinate: Option<Coordinate>,
}

impl<'a> Origin<'a> {
    /// Find the origin named `name` in `rows`.
    ///
    /// Pass the unfiltered rows so an active filter cannot hide the origin.
    pub fn locate(rows: &[Row], name: &'a str) -> Self {
        let coordinate = rows
            .iter()
            .find(|row| row.location == name)
            .and_then(Row::coordinate);
        Self { name, coordinate }
    }

    /// Whether `row` is the origin.
    pub fn is_origin(&self, row: &Row) -> bool {
        row.location == self.name
    }

    /// The origin's coordinate, if it was found with valid coordinates.
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }
}

/// Attach a distance to every row in `rows`, preserving order.
///
/// Without a usable origin every row is unavailable.
pub fn annotate_rows(rows: Vec<Row>, origin: &Origin<'_>, mode: DistanceMode) -> Vec<AnnotatedRow> {
    let Some(anchor) = origin.coordinate() else {
        debug!(origin = origin.name, "origin missing or without coordinates");
        return rows.into_iter().map(AnnotatedRow::unavailable).collect();
    };

    debug!(?mode, rows = rows.len(), "annotating distances");
    match mode {
        DistanceMode::Direct => annotate_direct(rows, origin, anchor),
        DistanceMode::Cumulative => annotate_cumulative(rows, origin, anchor),
    }
}

fn annotate_direct(rows: Vec<Row>, origin: &Origin<'_>, anchor: Coordinate) -> Vec<AnnotatedRow> {
    rows.into_iter()
        .map(|row| {
            if origin.is_origin(&row) {
                return AnnotatedRow::new(row, Kilometer::Distance(0.0), 0.0);
            }
            match row.coordinate() {
                Some(point) => {
                    let km = distance(&anchor, &point);
                    AnnotatedRow::new(row, Kilometer::Distance(km), km)
                }
                None => AnnotatedRow::unavailable(row),
            }
        })
        .collect()
}

fn annotate_cumulative(
    rows: Vec<Row>,
    origin: &Origin<'_>,
    anchor: Coordinate,
) -> Vec<AnnotatedRow> {
    let mut previous = anchor;
    let mut total = 0.0;

    rows.into_iter()
        .map(|row| {
            if origin.is_origin(&row) {
                previous = anchor;
                total = 0.0;
                return AnnotatedRow::new(row, Kilometer::Distance(0.0), 0.0);
            }
            // A gap leaves `previous` on the last measurable stop
            let Some(point) = row.coordinate() else {
                return AnnotatedRow::unavailable(row);
            };
            let segment = distance(&previous, &point);
            total += segment;
            previous = point;
            AnnotatedRow::new(row, Kilometer::Distance(total), segment)
        })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_stop() -> impl Strategy<Value = Row> {
        (
            "[a-z]{4}",
            prop::option::weighted(0.8, (-60.0f64..60.0, -170.0f64..170.0)),
        )
            .prop_map(|(id, coords)| {
                let row = Row::new(id.clone(), id, "R1");
                match coords {
                    Some((lat, lon)) => row.with_coordinates(lat.to_string(), lon.to_string()),
                    None => row,
                }
            })
    }

    fn with_depot(mut rows: Vec<Row>) -> Vec<Row> {
        rows.insert(0, Row::new("depot", "Depot", "D").with_coordinates("10", "20"));
        rows
    }

    proptest! {
        /// Each row's cumulative distance is the sum of segments so far
        #[test]
        fn cumulative_is_prefix_sum(rows in prop::collection::vec(arb_stop(), 0..15)) {
            let rows = with_depot(rows);
            let origin = Origin::locate(&rows, "Depot");
            let out = annotate_rows(rows, &origin, DistanceMode::Cumulative);

            let mut sum = 0.0;
            for row in &out {
                sum += row.segment_distance;
                if let Some(km) = row.kilometer.value() {
                    prop_assert!((km - sum).abs() < 1e-6);
                } else {
                    prop_assert_eq!(row.segment_distance, 0.0);
                }
            }
        }

        /// Direct mode distances equal the distance from the origin
        #[test]
        fn direct_is_radial(rows in prop::collection::vec(arb_stop(), 0..15)) {
            let rows = with_depot(rows);
            let origin = Origin::locate(&rows, "Depot");
            let anchor = origin.coordinate().unwrap();
            let out = annotate_rows(rows, &origin, DistanceMode::Direct);

            prop_assert_eq!(out[0].kilometer, Kilometer::Distance(0.0));
            for row in &out[1..] {
                match row.row.coordinate() {
                    Some(point) => prop_assert_eq!(row.kilometer, Kilometer::Distance(distance(&anchor, &point))),
                    None => prop_assert!(row.kilometer.is_unavailable()),
                }
            }
        }
    }
}
