//! Aggregate statistics over the shopping history
//!
//! Statistics are a pure function of the record list: computing them twice
//! without an intervening append yields identical output.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::ShoppingListRecord;

/// A product ranked by how many distinct lists it appears in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProduct {
    /// Normalized product name
    pub name: String,

    /// Number of distinct lists containing the product
    pub count: usize,
}

/// First and last calendar day with a recorded list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRange {
    pub first: String,
    pub last: String,
}

/// Aggregate statistics over the full history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// Number of recorded lists
    pub total_lists: usize,

    /// Total items across all lists
    pub total_items: usize,

    /// Arithmetic mean of items per list; 0 on empty history
    pub average_items_per_list: f64,

    /// Products ranked by distinct-list count, descending.
    /// Ties break by first appearance order across the history.
    pub top_products: Vec<TopProduct>,

    /// First and last shopping day, if any lists exist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl Statistics {
    /// Computes statistics over the given records, reporting at most
    /// `top_limit` products.
    pub fn compute(records: &[ShoppingListRecord], top_limit: usize) -> Self {
        let total_lists = records.len();
        let total_items: usize = records.iter().map(|r| r.items.len()).sum();

        let average_items_per_list = if total_lists == 0 {
            0.0
        } else {
            total_items as f64 / total_lists as f64
        };

        // (distinct-list count, first-seen position) per normalized product.
        // A product repeated within one list counts that list once.
        let mut counts: BTreeMap<String, (usize, usize)> = BTreeMap::new();
        let mut position = 0usize;
        for record in records {
            let mut seen_in_record = std::collections::BTreeSet::new();
            for item in &record.items {
                let key = item.product_key();
                if key.is_empty() || !seen_in_record.insert(key.clone()) {
                    continue;
                }
                let entry = counts.entry(key).or_insert_with(|| {
                    let first_seen = position;
                    position += 1;
                    (0, first_seen)
                });
                entry.0 += 1;
            }
        }

        let mut ranked: Vec<(String, usize, usize)> = counts
            .into_iter()
            .map(|(name, (count, first_seen))| (name, count, first_seen))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        let top_products = ranked
            .into_iter()
            .take(top_limit)
            .map(|(name, count, _)| TopProduct { name, count })
            .collect();

        let mut days: Vec<String> = records.iter().map(|r| r.day_key()).collect();
        days.sort();
        let date_range = match (days.first(), days.last()) {
            (Some(first), Some(last)) => Some(DateRange {
                first: first.clone(),
                last: last.clone(),
            }),
            _ => None,
        };

        Self {
            total_lists,
            total_items,
            average_items_per_list,
            top_products,
            date_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Item;
    use chrono::{TimeZone, Utc};

    fn record_at(day: u32, names: &[&str]) -> ShoppingListRecord {
        let date = Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap();
        let items = names.iter().map(|n| Item::new(*n)).collect();
        ShoppingListRecord::new(items, None, date)
    }

    #[test]
    fn empty_history() {
        let stats = Statistics::compute(&[], 10);
        assert_eq!(stats.total_lists, 0);
        assert_eq!(stats.total_items, 0);
        assert_eq!(stats.average_items_per_list, 0.0);
        assert!(stats.top_products.is_empty());
        assert!(stats.date_range.is_none());
    }

    #[test]
    fn totals_and_average() {
        let records = vec![
            record_at(1, &["Milk", "Bread"]),
            record_at(2, &["Milk", "Eggs", "Butter", "Jam"]),
        ];

        let stats = Statistics::compute(&records, 10);
        assert_eq!(stats.total_lists, 2);
        assert_eq!(stats.total_items, 6);
        assert_eq!(stats.average_items_per_list, 3.0);
    }

    #[test]
    fn top_products_count_distinct_lists_not_occurrences() {
        // Milk twice within one list still counts that list once
        let records = vec![
            record_at(1, &["Milk", "milk", "Bread"]),
            record_at(2, &["Bread"]),
            record_at(3, &["Bread"]),
        ];

        let stats = Statistics::compute(&records, 10);
        assert_eq!(stats.top_products[0].name, "bread");
        assert_eq!(stats.top_products[0].count, 3);
        assert_eq!(stats.top_products[1].name, "milk");
        assert_eq!(stats.top_products[1].count, 1);
    }

    #[test]
    fn ties_break_by_first_seen_order() {
        let records = vec![
            record_at(1, &["Zucchini", "Apple"]),
            record_at(2, &["Apple", "Zucchini"]),
        ];

        let stats = Statistics::compute(&records, 10);
        // Both appear in 2 lists; zucchini was seen first in history order
        assert_eq!(stats.top_products[0].name, "zucchini");
        assert_eq!(stats.top_products[1].name, "apple");
    }

    #[test]
    fn top_limit_applies() {
        let records = vec![record_at(1, &["a", "b", "c", "d"])];
        let stats = Statistics::compute(&records, 2);
        assert_eq!(stats.top_products.len(), 2);
    }

    #[test]
    fn date_range_spans_history() {
        let records = vec![
            record_at(9, &["Milk"]),
            record_at(2, &["Bread"]),
            record_at(5, &["Eggs"]),
        ];

        let stats = Statistics::compute(&records, 10);
        let range = stats.date_range.unwrap();
        assert_eq!(range.first, "2025-03-02");
        assert_eq!(range.last, "2025-03-09");
    }

    #[test]
    fn deterministic() {
        let records = vec![
            record_at(1, &["Milk", "Bread"]),
            record_at(2, &["Bread", "Eggs"]),
        ];

        assert_eq!(
            Statistics::compute(&records, 10),
            Statistics::compute(&records, 10)
        );
    }
}
