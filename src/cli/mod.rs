//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Record | Append to history | `add` |
//! | Browse | Read back lists | `recent`, `show` |
//! | Query | Indexed lookups | `on`, `between`, `product`, `category` |
//! | Search | Free-text scan | `search` |
//! | Maintenance | Stats and repair | `stats`, `reindex` |
//!
//! All commands support a global `--format text|json` flag and `--verbose`
//! for debug output on stderr. The history file location comes from
//! `--file`, the `BASKET_HISTORY_FILE` environment variable, or config.
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod add;
mod app;
mod output;
mod query_cmd;
mod stats_cmd;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
