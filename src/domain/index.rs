//! Secondary indexes over the shopping history
//!
//! Three derived mappings accelerate the common lookups: by calendar day,
//! by normalized product name, and by category label. The indexes are pure
//! derived state — always exactly reconstructible from the record list —
//! and the store maintains them incrementally on every append.
//!
//! Day keys are `YYYY-MM-DD` strings, so lexicographic `BTreeMap` order is
//! chronological order and date-range queries are a plain `range()` walk.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::id::ListId;
use super::record::ShoppingListRecord;

/// The three secondary indexes of a history document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryIndexes {
    /// Calendar day (`YYYY-MM-DD`) -> records created on that day
    pub by_date: BTreeMap<String, BTreeSet<ListId>>,

    /// Normalized product name -> records containing that product
    pub by_product: BTreeMap<String, BTreeSet<ListId>>,

    /// Normalized category label -> records with at least one item in it
    pub by_category: BTreeMap<String, BTreeSet<ListId>>,
}

impl HistoryIndexes {
    /// Creates empty indexes
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one record's entries to all three indexes
    pub fn add_record(&mut self, record: &ShoppingListRecord) {
        self.by_date
            .entry(record.day_key())
            .or_default()
            .insert(record.id.clone());

        for item in &record.items {
            let key = item.product_key();
            if !key.is_empty() {
                self.by_product
                    .entry(key)
                    .or_default()
                    .insert(record.id.clone());
            }

            // Items without a category are simply not category-indexed
            if let Some(category) = item.category_key() {
                if !category.is_empty() {
                    self.by_category
                        .entry(category)
                        .or_default()
                        .insert(record.id.clone());
                }
            }
        }
    }

    /// Rebuilds all three indexes from scratch
    pub fn rebuild(records: &[ShoppingListRecord]) -> Self {
        let mut indexes = Self::new();
        for record in records {
            indexes.add_record(record);
        }
        indexes
    }

    /// Returns the IDs of records created on the given day
    pub fn ids_for_day(&self, day_key: &str) -> impl Iterator<Item = &ListId> {
        self.by_date.get(day_key).into_iter().flatten()
    }

    /// Returns the IDs of records created in `[start_key, end_key]` inclusive.
    /// An inverted range (`start_key > end_key`) spans no days and yields
    /// nothing; `BTreeMap::range` would panic on it.
    pub fn ids_in_day_range<'a>(
        &'a self,
        start_key: &str,
        end_key: &str,
    ) -> impl Iterator<Item = &'a ListId> {
        let buckets = if start_key <= end_key {
            Some(self.by_date.range(start_key.to_string()..=end_key.to_string()))
        } else {
            None
        };
        buckets.into_iter().flatten().flat_map(|(_, ids)| ids.iter())
    }

    /// Returns the IDs of records containing the given normalized product key
    pub fn ids_for_product(&self, product_key: &str) -> impl Iterator<Item = &ListId> {
        self.by_product.get(product_key).into_iter().flatten()
    }

    /// Returns the IDs of records with at least one item in the given category
    pub fn ids_for_category(&self, category_key: &str) -> impl Iterator<Item = &ListId> {
        self.by_category.get(category_key).into_iter().flatten()
    }

    /// Returns (days, products, categories) bucket counts
    pub fn bucket_counts(&self) -> (usize, usize, usize) {
        (
            self.by_date.len(),
            self.by_product.len(),
            self.by_category.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::Item;
    use chrono::{DateTime, TimeZone, Utc};

    fn record_at(day: u32, items: Vec<Item>) -> ShoppingListRecord {
        let date = Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap();
        ShoppingListRecord::new(items, None, date)
    }

    #[test]
    fn add_record_populates_all_three_indexes() {
        let record = record_at(
            1,
            vec![
                Item::with_category("AH Halfvolle melk", "essentials"),
                Item::with_category("Kipfilet", "meat"),
            ],
        );

        let mut indexes = HistoryIndexes::new();
        indexes.add_record(&record);

        assert!(indexes.ids_for_day("2025-03-01").any(|id| id == &record.id));
        assert!(indexes
            .ids_for_product("ah halfvolle melk")
            .any(|id| id == &record.id));
        assert!(indexes.ids_for_category("meat").any(|id| id == &record.id));
        assert_eq!(indexes.bucket_counts(), (1, 2, 2));
    }

    #[test]
    fn uncategorized_items_not_category_indexed() {
        let record = record_at(1, vec![Item::new("Milk")]);

        let mut indexes = HistoryIndexes::new();
        indexes.add_record(&record);

        assert!(indexes.by_category.is_empty());
        assert_eq!(indexes.by_product.len(), 1);
    }

    #[test]
    fn duplicate_product_in_one_record_indexed_once() {
        let record = record_at(1, vec![Item::new("Milk"), Item::new("milk")]);

        let mut indexes = HistoryIndexes::new();
        indexes.add_record(&record);

        // Case-folded to the same key, set semantics keep one entry
        let ids: Vec<_> = indexes.ids_for_product("milk").collect();
        assert_eq!(ids, vec![&record.id]);
    }

    #[test]
    fn day_range_is_inclusive() {
        let r1 = record_at(1, vec![Item::new("Milk")]);
        let r2 = record_at(5, vec![Item::new("Bread")]);
        let r3 = record_at(9, vec![Item::new("Eggs")]);

        let indexes = HistoryIndexes::rebuild(&[r1.clone(), r2.clone(), r3.clone()]);

        let in_range: BTreeSet<_> = indexes.ids_in_day_range("2025-03-01", "2025-03-05").collect();
        assert!(in_range.contains(&r1.id));
        assert!(in_range.contains(&r2.id));
        assert!(!in_range.contains(&r3.id));
    }

    #[test]
    fn inverted_day_range_yields_nothing() {
        let record = record_at(5, vec![Item::new("Milk")]);
        let indexes = HistoryIndexes::rebuild(std::slice::from_ref(&record));

        assert_eq!(indexes.ids_in_day_range("2025-03-09", "2025-03-01").count(), 0);
    }

    #[test]
    fn rebuild_matches_incremental() {
        let records = vec![
            record_at(1, vec![Item::with_category("Milk", "essentials")]),
            record_at(2, vec![Item::new("Bread"), Item::with_category("Steak", "meat")]),
            record_at(2, vec![Item::new("Milk")]),
        ];

        let mut incremental = HistoryIndexes::new();
        for record in &records {
            incremental.add_record(record);
        }

        assert_eq!(incremental, HistoryIndexes::rebuild(&records));
    }

    #[test]
    fn serde_layout_is_key_to_id_array() {
        let record = record_at(1, vec![Item::with_category("Milk", "essentials")]);
        let indexes = HistoryIndexes::rebuild(std::slice::from_ref(&record));

        let value = serde_json::to_value(&indexes).unwrap();
        assert_eq!(
            value["by_product"]["milk"],
            serde_json::json!([record.id.to_string()])
        );
        assert_eq!(
            value["by_date"]["2025-03-01"],
            serde_json::json!([record.id.to_string()])
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_item() -> impl Strategy<Value = Item> {
            (
                "[a-z]{1,8}( [a-z]{1,8})?",
                proptest::option::of(prop_oneof![
                    Just("essentials".to_string()),
                    Just("meat".to_string()),
                    Just("vegetables".to_string()),
                ]),
            )
                .prop_map(|(name, category)| Item {
                    name,
                    category,
                    extra: BTreeMap::new(),
                })
        }

        fn arb_records() -> impl Strategy<Value = Vec<ShoppingListRecord>> {
            proptest::collection::vec((proptest::collection::vec(arb_item(), 0..6), 0u32..28), 0..12)
                .prop_map(|specs| {
                    specs
                        .into_iter()
                        .enumerate()
                        .map(|(i, (items, day))| {
                            // Distinct timestamps keep IDs unique
                            let date: DateTime<Utc> = Utc
                                .with_ymd_and_hms(2025, 3, 1 + day % 28, 8, 0, i as u32 % 60)
                                .unwrap()
                                + chrono::Duration::milliseconds(i as i64);
                            ShoppingListRecord::new(items, None, date)
                        })
                        .collect()
                })
        }

        proptest! {
            /// Incremental maintenance and full rebuild never diverge.
            #[test]
            fn incremental_equals_rebuild(records in arb_records()) {
                let mut incremental = HistoryIndexes::new();
                for record in &records {
                    incremental.add_record(record);
                }
                prop_assert_eq!(incremental, HistoryIndexes::rebuild(&records));
            }

            /// Every record is reachable through its own day bucket.
            #[test]
            fn every_record_reachable_by_day(records in arb_records()) {
                let indexes = HistoryIndexes::rebuild(&records);
                for record in &records {
                    prop_assert!(indexes.ids_for_day(&record.day_key()).any(|id| id == &record.id));
                }
            }
        }
    }
}
