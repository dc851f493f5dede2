//! Basket - A local-first shopping history tracker for households
//!
//! Basket keeps every shopping list you record in one JSON document with
//! secondary indexes by day, product, and category, so questions like
//! "when did I last buy milk" resolve without rescanning the history.

pub mod cli;
pub mod domain;
pub mod query;
pub mod store;

pub use domain::{Item, ListId, ShoppingListRecord};
pub use query::{QueryEngine, Statistics};
pub use store::{HistoryDocument, HistoryStore};
