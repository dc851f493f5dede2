//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{add, query_cmd, stats_cmd};
use crate::store::{Config, HistoryStore};

#[derive(Parser)]
#[command(name = "basket")]
#[command(author, version, about = "Local-first shopping history tracker for households")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// History file location (overrides config)
    #[arg(long, global = true, env = "BASKET_HISTORY_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a new shopping list
    Add {
        /// Items as `name` or `name@category` (e.g. "Kipfilet@meat")
        items: Vec<String>,

        /// Free-text note attached to the list
        #[arg(long)]
        notes: Option<String>,

        /// Read items from a JSON array file (the classifier's output shape)
        #[arg(long, value_name = "FILE")]
        from_json: Option<PathBuf>,
    },

    /// Show the most recent shopping lists
    Recent {
        /// How many lists to show (defaults to config `recent_count`)
        #[arg(long, short = 'n')]
        count: Option<usize>,
    },

    /// Show one shopping list in full
    Show {
        /// List ID (e.g. l-7f2b4c1)
        id: String,
    },

    /// Lists created on an exact day
    On {
        /// Day as YYYY-MM-DD
        date: String,
    },

    /// Lists created in an inclusive date range
    Between {
        /// Start day as YYYY-MM-DD
        start: String,

        /// End day as YYYY-MM-DD
        end: String,
    },

    /// Lists containing a product (case-insensitive exact name match)
    Product {
        /// Product name
        name: String,
    },

    /// Lists with at least one item in a category
    Category {
        /// Category label (e.g. meat, vegetables)
        name: String,
    },

    /// Free-text search across product names, categories, and notes
    Search {
        /// Search term (substring, case-insensitive)
        term: String,
    },

    /// Show history statistics
    Stats,

    /// Rebuild the secondary indexes from the record list
    Reindex,
}

/// Parses arguments and executes the chosen command
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    let config = Config::load().context("Failed to load configuration")?;
    let path = config.resolve_history_file(cli.file)?;
    output.verbose_ctx("store", &format!("History file: {}", path.display()));

    match cli.command {
        Commands::Add {
            items,
            notes,
            from_json,
        } => {
            let mut store = HistoryStore::open(&path)?;
            add::add(&output, &mut store, &items, notes, from_json.as_deref())
        }
        Commands::Recent { count } => {
            let store = HistoryStore::open(&path)?;
            query_cmd::recent(&output, &store, count.unwrap_or(config.recent_count))
        }
        Commands::Show { id } => {
            let store = HistoryStore::open(&path)?;
            query_cmd::show(&output, &store, &id)
        }
        Commands::On { date } => {
            let store = HistoryStore::open(&path)?;
            query_cmd::on(&output, &store, &date)
        }
        Commands::Between { start, end } => {
            let store = HistoryStore::open(&path)?;
            query_cmd::between(&output, &store, &start, &end)
        }
        Commands::Product { name } => {
            let store = HistoryStore::open(&path)?;
            query_cmd::product(&output, &store, &name)
        }
        Commands::Category { name } => {
            let store = HistoryStore::open(&path)?;
            query_cmd::category(&output, &store, &name)
        }
        Commands::Search { term } => {
            let store = HistoryStore::open(&path)?;
            query_cmd::search(&output, &store, &term)
        }
        Commands::Stats => {
            let store = HistoryStore::open(&path)?;
            stats_cmd::stats(&output, &store, config.top_products)
        }
        Commands::Reindex => {
            let mut store = HistoryStore::open(&path)?;
            stats_cmd::reindex(&output, &mut store)
        }
    }
}
