//! Statistics and index maintenance commands

use anyhow::Result;

use super::output::Output;
use crate::query::QueryEngine;
use crate::store::HistoryStore;

/// Show history statistics
pub fn stats(output: &Output, store: &HistoryStore, top_limit: usize) -> Result<()> {
    let engine = QueryEngine::new(store.document());
    let stats = engine.statistics(top_limit);

    if output.is_json() {
        output.data(&stats);
        return Ok(());
    }

    println!("Shopping history statistics");
    println!("{}", "-".repeat(40));
    println!("Total lists:            {}", stats.total_lists);
    println!("Total items:            {}", stats.total_items);
    println!("Average items per list: {:.2}", stats.average_items_per_list);

    if let Some(range) = &stats.date_range {
        println!("First list:             {}", range.first);
        println!("Last list:              {}", range.last);
    }

    if !stats.top_products.is_empty() {
        output.blank();
        println!("Top products:");
        for (i, product) in stats.top_products.iter().enumerate() {
            println!("  {}. {} ({} lists)", i + 1, product.name, product.count);
        }
    }

    Ok(())
}

/// Rebuild the secondary indexes from the record list
pub fn reindex(output: &Output, store: &mut HistoryStore) -> Result<()> {
    store.rebuild_indexes()?;

    let (days, products, categories) = store.document().indexes.bucket_counts();
    output.verbose_ctx(
        "reindex",
        &format!("{} days, {} products, {} categories", days, products, categories),
    );
    output.success(&format!(
        "Rebuilt indexes over {} lists ({} days, {} products, {} categories)",
        store.len(),
        days,
        products,
        categories
    ));

    Ok(())
}
