//! Domain models for Basket
//!
//! Contains the core data model without any I/O concerns.

mod id;
mod index;
mod record;

pub use id::{IdError, ListId};
pub use index::HistoryIndexes;
pub use record::{normalize_key, Item, ShoppingListRecord};
