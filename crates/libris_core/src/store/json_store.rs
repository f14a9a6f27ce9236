//! JSON document-backed record store.
//!
//! # Responsibility
//! - Load one record array from a JSON document at construction.
//! - Overwrite that document with the full collection on `save_changes`.
//!
//! # Invariants
//! - After `open` succeeds the backing document exists, unless it was
//!   present but unparseable (it is then kept until the next save).
//! - Load failures never propagate; write failures always do.
//! - `recovered()` reports a present but unparseable document so callers can
//!   avoid overwriting it with fresh content.

use super::field_names::canonicalize_keys;
use super::{remove_by_id, replace_by_id, Record, RecordStore, StoreError, StoreResult};
use log::{info, warn};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Record store persisted as a pretty-printed JSON array.
#[derive(Debug)]
pub struct JsonRecordStore<T: Record> {
    path: PathBuf,
    records: Vec<T>,
    recovered: bool,
}

enum LoadOutcome<T> {
    Loaded(Vec<T>),
    Empty,
    Unreadable(String),
}

impl<T: Record> JsonRecordStore<T> {
    /// Opens the store backed by `path`, loading any existing records.
    ///
    /// # Side effects
    /// - Writes `[]` when the document is absent or empty.
    /// - Emits `store_open` logging events.
    ///
    /// # Errors
    /// - Returns `StoreError` only when the initial empty document cannot be
    ///   written.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let started_at = Instant::now();
        let mut store = Self {
            path: path.into(),
            records: Vec::new(),
            recovered: false,
        };

        match store.load_all() {
            LoadOutcome::Loaded(records) => {
                store.records = records;
                info!(
                    "event=store_open module=store status=ok source=document records={} duration_ms={}",
                    store.records.len(),
                    started_at.elapsed().as_millis()
                );
            }
            LoadOutcome::Empty => {
                store.save_changes()?;
                info!(
                    "event=store_open module=store status=ok source=initialized records=0 duration_ms={}",
                    started_at.elapsed().as_millis()
                );
            }
            LoadOutcome::Unreadable(message) => {
                store.recovered = true;
                warn!(
                    "event=store_open module=store status=recovered source=fallback_empty path={} error={}",
                    store.path.display(),
                    message
                );
            }
        }

        Ok(store)
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the document existed but could not be decoded at open.
    pub fn recovered(&self) -> bool {
        self.recovered
    }

    fn load_all(&self) -> LoadOutcome<T> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return LoadOutcome::Empty,
            Err(err) => return LoadOutcome::Unreadable(format!("read failed: {err}")),
        };

        if text.trim().is_empty() {
            return LoadOutcome::Empty;
        }

        let mut document: Value = match serde_json::from_str(&text) {
            Ok(document) => document,
            Err(err) => return LoadOutcome::Unreadable(format!("invalid json: {err}")),
        };

        if document.is_null() {
            return LoadOutcome::Empty;
        }
        if !document.is_array() {
            return LoadOutcome::Unreadable("expected a json array".to_string());
        }

        canonicalize_keys(&mut document, T::FIELD_NAMES);
        match serde_json::from_value::<Vec<T>>(document) {
            Ok(records) => LoadOutcome::Loaded(records),
            Err(err) => LoadOutcome::Unreadable(format!("invalid record: {err}")),
        }
    }
}

impl<T: Record> RecordStore<T> for JsonRecordStore<T> {
    fn get_all(&self) -> &[T] {
        &self.records
    }

    fn add(&mut self, record: T) {
        self.records.push(record);
    }

    fn update(&mut self, record: T) {
        replace_by_id(&mut self.records, record);
    }

    fn delete(&mut self, id: T::Id) {
        remove_by_id(&mut self.records, id);
    }

    fn save_changes(&mut self) -> StoreResult<()> {
        let mut json =
            serde_json::to_string_pretty(&self.records).map_err(|source| StoreError::Serialize {
                path: self.path.clone(),
                source,
            })?;
        json.push('\n');

        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn restore(&mut self, records: Vec<T>) {
        self.records = records;
    }
}
