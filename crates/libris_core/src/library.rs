//! Library bootstrap: data directory, both stores, and the service.
//!
//! # Invariants
//! - Both documents exist (or were kept for recovery) once `open_library`
//!   returns.

use crate::config::LibraryConfig;
use crate::model::book::Book;
use crate::model::loan::LoanRecord;
use crate::service::inventory_service::InventoryService;
use crate::store::json_store::JsonRecordStore;
use crate::store::{StoreError, StoreResult};
use log::{error, info};
use std::time::Instant;

/// Inventory service persisted as two JSON documents.
pub type JsonInventory = InventoryService<JsonRecordStore<Book>, JsonRecordStore<LoanRecord>>;

/// Opens (creating when needed) the library described by `config`.
///
/// # Side effects
/// - Creates the data directory.
/// - Emits `library_open` logging events with duration and status.
///
/// # Errors
/// - Returns `StoreError::Io` when the directory or an initial document
///   cannot be created.
pub fn open_library(config: &LibraryConfig) -> StoreResult<JsonInventory> {
    let started_at = Instant::now();
    info!("event=library_open module=library status=start");

    match open_stores(config) {
        Ok(service) => {
            info!(
                "event=library_open module=library status=ok books={} loans={} duration_ms={}",
                service.get_all_books().len(),
                service.get_all_loans().len(),
                started_at.elapsed().as_millis()
            );
            Ok(service)
        }
        Err(err) => {
            error!(
                "event=library_open module=library status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn open_stores(config: &LibraryConfig) -> StoreResult<JsonInventory> {
    config.ensure_data_dir().map_err(|source| StoreError::Io {
        path: config.data_dir.clone(),
        source,
    })?;
    let books = JsonRecordStore::open(config.books_path())?;
    let loans = JsonRecordStore::open(config.loans_path())?;
    Ok(InventoryService::new(books, loans))
}
