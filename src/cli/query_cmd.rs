//! Query commands (recent, show, on, between, product, category, search)

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;

use super::output::Output;
use crate::domain::{ListId, ShoppingListRecord};
use crate::query::QueryEngine;
use crate::store::HistoryStore;

/// Show the most recent lists
pub fn recent(output: &Output, store: &HistoryStore, count: usize) -> Result<()> {
    let engine = QueryEngine::new(store.document());
    let results = engine.recent(count);
    output.verbose_ctx("recent", &format!("Found {} lists", results.len()));
    print_results(output, &results, "No shopping history yet.");
    Ok(())
}

/// Show one list in full
pub fn show(output: &Output, store: &HistoryStore, id: &str) -> Result<()> {
    let id: ListId = id
        .parse()
        .map_err(|e| anyhow!("{}", e))
        .context("Not a valid list ID")?;

    let record = store
        .get(&id)
        .ok_or_else(|| anyhow!("No shopping list with ID {}", id))?;

    if output.is_json() {
        output.data(record);
        return Ok(());
    }

    println!("List {} ({})", record.id, record.date.format("%Y-%m-%d %H:%M"));
    if let Some(notes) = &record.notes {
        println!("Notes: {}", notes);
    }
    println!("Items ({}):", record.total_items);
    for item in &record.items {
        match &item.category {
            Some(category) => println!("  - {} [{}]", item.name, category),
            None => println!("  - {}", item.name),
        }
    }
    Ok(())
}

/// Lists created on an exact day
pub fn on(output: &Output, store: &HistoryStore, date: &str) -> Result<()> {
    let day = parse_day(date)?;
    let engine = QueryEngine::new(store.document());
    let results = engine.query_by_date(Some(day), None, None)?;
    output.verbose_ctx("on", &format!("Found {} lists on {}", results.len(), day));
    print_results(output, &results, "No lists on that day.");
    Ok(())
}

/// Lists created in an inclusive date range
pub fn between(output: &Output, store: &HistoryStore, start: &str, end: &str) -> Result<()> {
    let start = parse_day(start)?;
    let end = parse_day(end)?;
    let engine = QueryEngine::new(store.document());
    let results = engine.query_by_date(None, Some(start), Some(end))?;
    output.verbose_ctx(
        "between",
        &format!("Found {} lists in {}..={}", results.len(), start, end),
    );
    print_results(output, &results, "No lists in that range.");
    Ok(())
}

/// Lists containing a product, by exact normalized name
pub fn product(output: &Output, store: &HistoryStore, name: &str) -> Result<()> {
    let engine = QueryEngine::new(store.document());
    let results = engine.query_by_product(name);
    output.verbose_ctx("product", &format!("Found {} lists", results.len()));
    print_results(output, &results, "No lists contain that product.");
    Ok(())
}

/// Lists with at least one item in a category
pub fn category(output: &Output, store: &HistoryStore, name: &str) -> Result<()> {
    let engine = QueryEngine::new(store.document());
    let results = engine.query_by_category(name);
    output.verbose_ctx("category", &format!("Found {} lists", results.len()));
    print_results(output, &results, "No lists in that category.");
    Ok(())
}

/// Free-text search across names, categories, and notes
pub fn search(output: &Output, store: &HistoryStore, term: &str) -> Result<()> {
    let engine = QueryEngine::new(store.document());
    let results = engine.search(term)?;
    output.verbose_ctx("search", &format!("Found {} lists", results.len()));
    print_results(output, &results, "No matches.");
    Ok(())
}

fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Not a valid date (expected YYYY-MM-DD): {}", s))
}

fn print_results(output: &Output, results: &[&ShoppingListRecord], empty_message: &str) {
    if output.is_json() {
        output.data(&results);
        return;
    }

    if results.is_empty() {
        println!("{}", empty_message);
        return;
    }

    println!("{:<11} {:<12} {:>5}  NOTES", "ID", "DATE", "ITEMS");
    println!("{}", "-".repeat(60));
    for record in results {
        println!(
            "{:<11} {:<12} {:>5}  {}",
            record.id.to_string(),
            record.date.format("%Y-%m-%d"),
            record.total_items,
            record.notes.as_deref().unwrap_or("")
        );
    }
}
