//! The persisted history document
//!
//! One root object holds everything: schema version, metadata, the ordered
//! record list, and the three secondary indexes. Downstream tooling reads
//! the JSON file directly, so the field layout here is a stable interface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{HistoryIndexes, Item, ListId, ShoppingListRecord};

/// Schema version written by this build
pub const SCHEMA_VERSION: &str = "1.0";

/// Schema versions this build can read
const KNOWN_VERSIONS: &[&str] = &["1.0"];

/// Document-level metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Set once, when the document is first created
    pub created_at: DateTime<Utc>,

    /// Set on every successful append
    pub last_updated: DateTime<Utc>,
}

/// The whole persisted shopping history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryDocument {
    /// Schema version tag
    pub version: String,

    /// Creation and last-update timestamps
    pub metadata: Metadata,

    /// All records, in append order
    pub lists: Vec<ShoppingListRecord>,

    /// Derived indexes, always reconstructible from `lists`
    pub indexes: HistoryIndexes,
}

impl HistoryDocument {
    /// Creates a fresh empty document
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            metadata: Metadata {
                created_at: now,
                last_updated: now,
            },
            lists: Vec::new(),
            indexes: HistoryIndexes::new(),
        }
    }

    /// Returns true if this document's schema version is one we can read
    pub fn version_is_known(&self) -> bool {
        KNOWN_VERSIONS.contains(&self.version.as_str())
    }

    /// Finds a record by ID
    pub fn get(&self, id: &ListId) -> Option<&ShoppingListRecord> {
        self.lists.iter().find(|record| &record.id == id)
    }

    /// Returns the number of records
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Returns true if the history is empty
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Constructs a record, appends it, and indexes it.
    ///
    /// Pure in-memory mutation; persistence is the store's job. Returns the
    /// ID of the new record.
    pub fn append_record(
        &mut self,
        items: Vec<Item>,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> ListId {
        let record = ShoppingListRecord::new(items, notes, now);
        let id = record.id.clone();
        self.indexes.add_record(&record);
        self.lists.push(record);
        self.metadata.last_updated = now;
        id
    }

    /// Recomputes all three indexes from `lists`, discarding the old ones
    pub fn rebuild_indexes(&mut self) {
        self.indexes = HistoryIndexes::rebuild(&self.lists);
    }

    /// Re-derives every record's `total_items`.
    ///
    /// Run after deserialization; a hand-edited file may carry stale counts.
    pub fn recompute_totals(&mut self) {
        for record in &mut self.lists {
            record.recompute_total();
        }
    }
}
