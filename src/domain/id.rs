//! List record IDs
//!
//! ID Format: `l-{7-char-hash}` (e.g., `l-7f2b4c1`)
//!
//! The hash is derived from the record's item names plus its creation
//! timestamp at nanosecond precision, so two records appended at different
//! moments always get different IDs even when their contents match.
//! IDs are never reused: history is append-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid list ID format: expected 'l-{{7-char-hash}}', got '{0}'")]
    InvalidListId(String),
}

/// Generates a 7-character hash from item names and a timestamp
fn generate_hash(item_names: &[&str], timestamp: DateTime<Utc>) -> String {
    let mut input = String::new();
    for name in item_names {
        input.push_str(name);
        input.push('\n');
    }
    input.push_str(&timestamp.timestamp_nanos_opt().unwrap_or(0).to_string());
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

/// List record ID in the format `l-{7-char-hash}`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ListId {
    hash: String,
}

impl ListId {
    /// Creates a new list ID from the record's item names and timestamp
    pub fn new(item_names: &[&str], timestamp: DateTime<Utc>) -> Self {
        Self {
            hash: generate_hash(item_names, timestamp),
        }
    }

    /// Returns the hash portion of the ID
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "l-{}", self.hash)
    }
}

impl FromStr for ListId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.starts_with("l-") {
            return Err(IdError::InvalidListId(s.to_string()));
        }

        let hash = &s[2..];
        if hash.len() != 7 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(IdError::InvalidListId(s.to_string()));
        }

        Ok(Self {
            hash: hash.to_string(),
        })
    }
}

impl TryFrom<String> for ListId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ListId> for String {
    fn from(id: ListId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_has_expected_format() {
        let id = ListId::new(&["Milk", "Bread"], Utc::now());
        let s = id.to_string();
        assert!(s.starts_with("l-"));
        assert_eq!(s.len(), 9);
        assert!(s[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn same_items_different_times_differ() {
        let t1 = "2025-01-01T10:00:00Z".parse().unwrap();
        let t2 = "2025-01-01T10:00:01Z".parse().unwrap();
        let id1 = ListId::new(&["Milk"], t1);
        let id2 = ListId::new(&["Milk"], t2);
        assert_ne!(id1, id2);
    }

    #[test]
    fn same_inputs_are_deterministic() {
        let t = "2025-01-01T10:00:00Z".parse().unwrap();
        assert_eq!(ListId::new(&["Milk"], t), ListId::new(&["Milk"], t));
    }

    #[test]
    fn parse_roundtrip() {
        let id = ListId::new(&["Milk"], Utc::now());
        let parsed: ListId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_rejects_bad_prefix() {
        assert!(matches!(
            "t-1234567".parse::<ListId>(),
            Err(IdError::InvalidListId(_))
        ));
    }

    #[test]
    fn parse_rejects_bad_hash() {
        assert!("l-12345".parse::<ListId>().is_err());
        assert!("l-12345678".parse::<ListId>().is_err());
        assert!("l-123456z".parse::<ListId>().is_err());
    }

    #[test]
    fn parse_trims_whitespace() {
        let id = ListId::new(&["Milk"], Utc::now());
        let parsed: ListId = format!("  {}  ", id).parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn serde_string_form() {
        let id = ListId::new(&["Milk"], Utc::now());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));

        let back: ListId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
