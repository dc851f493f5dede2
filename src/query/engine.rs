//! Read-only query resolution over a loaded history document
//!
//! The engine borrows the document and never mutates it. Date, product, and
//! category lookups resolve through the secondary indexes; free-text search
//! deliberately scans the record list, since the indexes only answer
//! exact-key lookups and a personal-scale history keeps the scan cheap.
//!
//! All results come back most-recent-first, deduplicated by record ID.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{normalize_key, ListId, ShoppingListRecord};
use crate::query::stats::Statistics;
use crate::store::HistoryDocument;

#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    /// Malformed query: reported to the caller, no state change.
    /// A well-formed query with no matches returns an empty result instead.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

/// Read-only query engine over one loaded document
pub struct QueryEngine<'a> {
    doc: &'a HistoryDocument,
}

impl<'a> QueryEngine<'a> {
    /// Creates an engine over the given document
    pub fn new(doc: &'a HistoryDocument) -> Self {
        Self { doc }
    }

    /// Queries by calendar day.
    ///
    /// Exactly one form per call: an exact day, or an inclusive
    /// `[start, end]` range (both bounds required). Anything else is an
    /// [`QueryError::InvalidQuery`].
    pub fn query_by_date(
        &self,
        exact: Option<NaiveDate>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<&'a ShoppingListRecord>, QueryError> {
        match (exact, start, end) {
            (Some(day), None, None) => {
                let key = day_key(day);
                Ok(self.resolve(self.doc.indexes.ids_for_day(&key)))
            }
            (None, Some(start), Some(end)) => {
                let ids: Vec<&ListId> = self
                    .doc
                    .indexes
                    .ids_in_day_range(&day_key(start), &day_key(end))
                    .collect();
                Ok(self.resolve(ids))
            }
            (Some(_), _, _) => Err(QueryError::InvalidQuery(
                "supply an exact day or a range, not both".to_string(),
            )),
            (None, _, _) => Err(QueryError::InvalidQuery(
                "supply an exact day, or both ends of a range".to_string(),
            )),
        }
    }

    /// Case-insensitive exact-match lookup by product name.
    ///
    /// Not a substring match: `"melk"` does not find `"AH Halfvolle melk"`
    /// (use [`search`](Self::search) for that). Miss returns empty.
    pub fn query_by_product(&self, name: &str) -> Vec<&'a ShoppingListRecord> {
        let key = normalize_key(name);
        self.resolve(self.doc.indexes.ids_for_product(&key))
    }

    /// Exact-match lookup by category label. Miss returns empty.
    pub fn query_by_category(&self, category: &str) -> Vec<&'a ShoppingListRecord> {
        let key = normalize_key(category);
        self.resolve(self.doc.indexes.ids_for_category(&key))
    }

    /// Case-insensitive substring search over notes only
    pub fn query_by_notes(
        &self,
        keyword: &str,
    ) -> Result<Vec<&'a ShoppingListRecord>, QueryError> {
        let keyword = require_term(keyword)?;
        let mut results: Vec<&ShoppingListRecord> = self
            .doc
            .lists
            .iter()
            .filter(|record| {
                record
                    .notes
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&keyword))
            })
            .collect();
        sort_recent_first(&mut results);
        Ok(results)
    }

    /// Comprehensive search: case-insensitive substring match across item
    /// names, item categories, and notes. Full scan by design.
    pub fn search(&self, term: &str) -> Result<Vec<&'a ShoppingListRecord>, QueryError> {
        let term = require_term(term)?;
        let mut results: Vec<&ShoppingListRecord> = self
            .doc
            .lists
            .iter()
            .filter(|record| record.matches_term(&term))
            .collect();
        sort_recent_first(&mut results);
        Ok(results)
    }

    /// Returns the `count` most recent records
    pub fn recent(&self, count: usize) -> Vec<&'a ShoppingListRecord> {
        let mut all: Vec<&ShoppingListRecord> = self.doc.lists.iter().collect();
        sort_recent_first(&mut all);
        all.truncate(count);
        all
    }

    /// Returns the most recent record, if any
    pub fn latest(&self) -> Option<&'a ShoppingListRecord> {
        self.recent(1).into_iter().next()
    }

    /// Computes aggregate statistics, reporting at most `top_limit` products
    pub fn statistics(&self, top_limit: usize) -> Statistics {
        Statistics::compute(&self.doc.lists, top_limit)
    }

    /// Resolves index IDs to records, most-recent-first, deduplicated
    fn resolve<I>(&self, ids: I) -> Vec<&'a ShoppingListRecord>
    where
        I: IntoIterator,
        I::Item: std::borrow::Borrow<ListId>,
    {
        use std::borrow::Borrow;
        use std::collections::BTreeSet;

        let wanted: BTreeSet<ListId> = ids.into_iter().map(|id| id.borrow().clone()).collect();

        // Walk the record list once rather than per-ID lookups; dedup comes
        // free since each record appears in `lists` exactly once.
        let mut results: Vec<&ShoppingListRecord> = self
            .doc
            .lists
            .iter()
            .filter(|record| wanted.contains(&record.id))
            .collect();
        sort_recent_first(&mut results);
        results
    }
}

fn day_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

fn require_term(term: &str) -> Result<String, QueryError> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        return Err(QueryError::InvalidQuery(
            "search term must not be blank".to_string(),
        ));
    }
    Ok(trimmed.to_lowercase())
}

fn sort_recent_first(records: &mut [&ShoppingListRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}
