//! # Storage Layer
//!
//! Persistence for the shopping history.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | History | JSON (single document) | `~/.local/share/basket/history.json` |
//! | Config | TOML | `~/.config/basket/config.toml` |
//!
//! ## Safety
//!
//! - All writes are atomic (temp file + rename), so a concurrent reader
//!   never observes a half-written document.
//! - [`HistoryStore`] uses file locking (`fs2`) around reads and writes.
//! - Single logical writer; mutations take `&mut self`, so in-process
//!   reads can never race a mutation.
//!
//! ## Key Types
//!
//! - [`HistoryStore`] - Load, append to, and save the history document
//! - [`HistoryDocument`] - The persisted aggregate (records + indexes)
//! - [`Config`] - User configuration

mod config;
mod document;
mod history;

pub use config::{Config, ConfigError};
pub use document::{HistoryDocument, Metadata, SCHEMA_VERSION};
pub use history::{HistoryStore, StoreError};
