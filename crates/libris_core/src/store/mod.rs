//! Record store abstractions and persistence implementations.
//!
//! # Responsibility
//! - Hold one typed record collection in memory, in insertion order.
//! - Flush the whole collection to its backing document on request.
//!
//! # Invariants
//! - Stores enforce no cross-record rules; mutation never persists implicitly.
//! - `update`/`delete` on an unknown id are silent no-ops.
//! - A missing or unparseable document loads as an empty collection.

use crate::model::book::{Book, BookId};
use crate::model::loan::{LoanId, LoanRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

mod field_names;
pub mod json_store;
pub mod memory_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure raised by `save_changes` or the initial document write.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
            Self::Serialize { path, source } => {
                write!(f, "failed to encode records for `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize { source, .. } => Some(source),
        }
    }
}

/// A persisted record type with a statically known identifier.
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Display + Debug;

    /// Canonical wire keys, matched case-insensitively on load.
    const FIELD_NAMES: &'static [&'static str];

    fn id(&self) -> Self::Id;
}

impl Record for Book {
    type Id = BookId;

    const FIELD_NAMES: &'static [&'static str] = &[
        "id",
        "title",
        "author",
        "isbn",
        "genre",
        "publicationYear",
        "quantity",
        "availableQuantity",
        "dateAdded",
    ];

    fn id(&self) -> BookId {
        self.id
    }
}

impl Record for LoanRecord {
    type Id = LoanId;

    const FIELD_NAMES: &'static [&'static str] = &[
        "id",
        "bookId",
        "borrowerName",
        "borrowDate",
        "dueDate",
        "returnDate",
        "isReturned",
    ];

    fn id(&self) -> LoanId {
        self.id
    }
}

/// Collection interface consumed by the inventory service.
pub trait RecordStore<T: Record> {
    /// Full collection in insertion order.
    fn get_all(&self) -> &[T];

    /// Linear lookup by identifier.
    fn get_by_id(&self, id: T::Id) -> Option<&T> {
        self.get_all().iter().find(|record| record.id() == id)
    }

    /// Appends without persisting.
    fn add(&mut self, record: T);

    /// Replaces the record with the same id in place; no-op when absent.
    fn update(&mut self, record: T);

    /// Removes the record with `id`; no-op when absent.
    fn delete(&mut self, id: T::Id);

    /// Writes the entire collection to the backing document.
    ///
    /// # Errors
    /// - Returns `StoreError` when encoding or writing fails.
    fn save_changes(&mut self) -> StoreResult<()>;

    /// Copy of the current collection, for rollback.
    fn snapshot(&self) -> Vec<T> {
        self.get_all().to_vec()
    }

    /// Replaces the in-memory collection without persisting.
    fn restore(&mut self, records: Vec<T>);
}

pub(crate) fn replace_by_id<T: Record>(records: &mut [T], record: T) {
    let id = record.id();
    if let Some(slot) = records.iter_mut().find(|existing| existing.id() == id) {
        *slot = record;
    }
}

pub(crate) fn remove_by_id<T: Record>(records: &mut Vec<T>, id: T::Id) {
    if let Some(index) = records.iter().position(|existing| existing.id() == id) {
        records.remove(index);
    }
}
