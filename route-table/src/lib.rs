//! Delivery route table.
//!
//! Derives the rows a logistics route table displays: filtered by the
//! user's controls, ordered by the day's delivery priority, and annotated
//! with distances from the depot or along the displayed route.

pub mod cache;
pub mod domain;
pub mod geo;
pub mod pipeline;
pub mod schedule;
pub mod settings;
pub mod source;
