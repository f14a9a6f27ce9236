//! Core inventory and loan logic for Libris.
//! This crate is the single source of truth for availability invariants.

pub mod config;
pub mod library;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::LibraryConfig;
pub use library::{open_library, JsonInventory};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::book::{Book, BookId};
pub use model::loan::{LoanId, LoanRecord, LOAN_PERIOD_DAYS};
pub use model::validation::ValidationError;
pub use service::error::{ConflictError, InventoryError, InventoryResult};
pub use service::inventory_service::InventoryService;
pub use service::recommend::MAX_RECOMMENDATIONS;
pub use service::search::SearchFilter;
pub use store::json_store::JsonRecordStore;
pub use store::memory_store::MemoryRecordStore;
pub use store::{Record, RecordStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
