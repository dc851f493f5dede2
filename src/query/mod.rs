//! Query layer
//!
//! Read-only lookups and statistics over a loaded [`HistoryDocument`].
//! Nothing in this module mutates the document.
//!
//! [`HistoryDocument`]: crate::store::HistoryDocument

mod engine;
mod stats;

pub use engine::{QueryEngine, QueryError};
pub use stats::{DateRange, Statistics, TopProduct};
