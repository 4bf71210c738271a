//! Domain types for the route table.
//!
//! Rows come from the persistence layer as loosely typed records. The
//! accessors here turn their text fields into validated values, treating
//! anything unparsable as absent rather than as an error.

mod coordinate;
mod filter;
mod kilometer;
mod row;

pub use coordinate::Coordinate;
pub use filter::FilterState;
pub use kilometer::{AnnotatedRow, Kilometer};
pub use row::{DeliveryAlt, InvalidDeliveryAlt, Row, RowId};
