//! Shopping list records
//!
//! A record is one completed shopping list: an ordered sequence of items
//! plus optional free-text notes. Records are write-once; history grows by
//! appending new records, never by editing old ones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::id::ListId;

/// Normalizes a product or category string into an index key.
///
/// Keys are trimmed and case-folded so `"AH Halfvolle Melk"` and
/// `"ah halfvolle melk"` resolve to the same index bucket.
pub fn normalize_key(s: &str) -> String {
    s.trim().to_lowercase()
}

/// A single item on a shopping list
///
/// Only `name` and `category` are meaningful to the store (they drive the
/// product and category indexes). Anything else the caller attaches —
/// quantity, price, discount metadata, a product URL — lands in `extra`
/// and round-trips through persistence untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Product display name
    pub name: String,

    /// Optional classification label (e.g. "meat", "vegetables")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Opaque caller metadata, preserved verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Item {
    /// Creates an item with no category
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
            extra: BTreeMap::new(),
        }
    }

    /// Creates an item with a category
    pub fn with_category(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: Some(category.into()),
            extra: BTreeMap::new(),
        }
    }

    /// Attaches an extra metadata field (builder style)
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Returns the normalized product index key for this item
    pub fn product_key(&self) -> String {
        normalize_key(&self.name)
    }

    /// Returns the normalized category index key, if the item has a category
    pub fn category_key(&self) -> Option<String> {
        self.category.as_deref().map(normalize_key)
    }
}

/// One persisted shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListRecord {
    /// Unique identifier, assigned at creation, never reused
    pub id: ListId,

    /// When the list was created; never mutated afterwards
    pub date: DateTime<Utc>,

    /// Items in insertion order (order matters for display, not identity)
    pub items: Vec<Item>,

    /// Optional free-text annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Derived item count, always `items.len()`
    pub total_items: usize,
}

impl ShoppingListRecord {
    /// Creates a new record with a fresh ID and the given timestamp
    pub fn new(items: Vec<Item>, notes: Option<String>, date: DateTime<Utc>) -> Self {
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        let id = ListId::new(&names, date);
        let total_items = items.len();
        Self {
            id,
            date,
            items,
            notes,
            total_items,
        }
    }

    /// Returns the UTC calendar-day key (`YYYY-MM-DD`) this record falls on
    pub fn day_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Re-derives `total_items` from the item list.
    ///
    /// Called after deserialization so a hand-edited document cannot carry
    /// a stale count.
    pub fn recompute_total(&mut self) {
        self.total_items = self.items.len();
    }

    /// Returns true if any field of this record matches the lowercased
    /// search term: item name, item category, or notes, by substring.
    pub fn matches_term(&self, term_lower: &str) -> bool {
        self.items.iter().any(|item| {
            item.name.to_lowercase().contains(term_lower)
                || item
                    .category
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase().contains(term_lower))
        }) || self
            .notes
            .as_deref()
            .is_some_and(|n| n.to_lowercase().contains(term_lower))
    }
}
