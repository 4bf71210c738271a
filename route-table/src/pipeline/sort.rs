//! Delivery-priority ordering.

use tracing::debug;

use crate::domain::Row;
use crate::schedule::{ScheduleClass, priority};

/// Order rows by delivery priority for the classified day.
///
/// Rows are ranked by:
/// 1. Daily stops first
/// 2. The alternating group served today, then the other group
///    (tied on off days)
/// 3. Inactive stops last
///
/// The sort is stable: rows of equal priority keep their input order.
pub fn sort_rows(mut rows: Vec<Row>, class: ScheduleClass) -> Vec<Row> {
    debug!(
        rows = rows.len(),
        parity = ?class.parity,
        suppressed = class.weekend_suppressed,
        "sorting by delivery priority"
    );
    // alternation() parses the tag; do it once per row
    rows.sort_by_cached_key(|row| priority(row.alternation(), class));
    rows
}
