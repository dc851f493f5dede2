//! History store: loading, appending, and saving the history document
//!
//! The store owns one [`HistoryDocument`] and its backing JSON file. All
//! writes go through temp-file + atomic rename, so a reader opening the
//! file mid-write never sees a half-written document. File locking (`fs2`)
//! guards the read and write windows; cross-process concurrent writers are
//! not supported beyond that.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use fs2::FileExt;
use thiserror::Error;

use super::document::HistoryDocument;
use crate::domain::{Item, ListId, ShoppingListRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file exists but cannot be parsed. Fatal: reinitializing
    /// over it would silently erase history.
    #[error("Corrupt history document at {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// The backing file parses but carries a schema version this build
    /// does not understand.
    #[error("Unknown schema version '{version}' in {path}")]
    UnknownVersion { path: PathBuf, version: String },
}

/// Store for the shopping history document
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    doc: HistoryDocument,
}

impl HistoryStore {
    /// Opens the store at the given path.
    ///
    /// A missing file yields a fresh empty document; an unreadable or
    /// unknown-version file is a [`StoreError`] surfaced to the caller.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let doc = Self::load_document(&path)?;
        Ok(Self { path, doc })
    }

    /// Returns the path to the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the loaded document
    pub fn document(&self) -> &HistoryDocument {
        &self.doc
    }

    /// Finds a record by ID
    pub fn get(&self, id: &ListId) -> Option<&ShoppingListRecord> {
        self.doc.get(id)
    }

    /// Returns the number of records
    pub fn len(&self) -> usize {
        self.doc.len()
    }

    /// Returns true if the history is empty
    pub fn is_empty(&self) -> bool {
        self.doc.is_empty()
    }

    /// Appends a new record and persists the whole document.
    ///
    /// The mutation is applied to a working copy and committed only after
    /// the atomic-rename save succeeds, so neither memory nor disk ever
    /// exposes a record without its index entries (or vice versa).
    pub fn append(
        &mut self,
        items: Vec<Item>,
        notes: Option<String>,
    ) -> Result<&ShoppingListRecord> {
        let mut working = self.doc.clone();
        let id = working.append_record(items, notes, Utc::now());

        Self::save_document(&self.path, &working)?;
        self.doc = working;

        Ok(self.doc.get(&id).expect("record was just appended"))
    }

    /// Recomputes all indexes from the record list and persists the result.
    ///
    /// Repair tool for a document whose indexes are suspected stale (e.g.
    /// hand-edited storage). Never invoked implicitly on load.
    pub fn rebuild_indexes(&mut self) -> Result<()> {
        let mut working = self.doc.clone();
        working.rebuild_indexes();

        Self::save_document(&self.path, &working)?;
        self.doc = working;

        Ok(())
    }

    /// Persists the current document
    pub fn save(&self) -> Result<()> {
        Self::save_document(&self.path, &self.doc)
    }

    fn load_document(path: &Path) -> Result<HistoryDocument> {
        if !path.exists() {
            return Ok(HistoryDocument::new(Utc::now()));
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open history file: {}", path.display()))?;

        // Shared lock so we never read a document mid-replace
        file.lock_shared()
            .context("Failed to acquire read lock on history file")?;

        let mut contents = String::new();
        (&file)
            .read_to_string(&mut contents)
            .with_context(|| format!("Failed to read history file: {}", path.display()))?;

        let mut doc: HistoryDocument =
            serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if !doc.version_is_known() {
            return Err(StoreError::UnknownVersion {
                path: path.to_path_buf(),
                version: doc.version,
            }
            .into());
        }

        // A hand-edited file may carry stale counts
        doc.recompute_totals();

        Ok(doc)
    }

    fn save_document(path: &Path, doc: &HistoryDocument) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        // Write to temp file first
        let temp_path = temp_path_for(path);

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on history file")?;

            let mut writer = BufWriter::new(&file);
            serde_json::to_writer_pretty(&mut writer, doc)
                .context("Failed to serialize history document")?;
            writer.flush().context("Failed to flush history document")?;
        }

        // Atomic rename
        fs::rename(&temp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
