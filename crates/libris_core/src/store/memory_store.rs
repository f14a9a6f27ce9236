//! Ephemeral record store with no backing document.

use super::{remove_by_id, replace_by_id, Record, RecordStore, StoreResult};

/// In-memory record store; `save_changes` always succeeds.
#[derive(Debug, Clone)]
pub struct MemoryRecordStore<T: Record> {
    records: Vec<T>,
    flush_count: usize,
}

impl<T: Record> MemoryRecordStore<T> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Starts from an existing collection, as if loaded from a document.
    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records,
            flush_count: 0,
        }
    }

    /// Number of successful `save_changes` calls so far.
    pub fn flush_count(&self) -> usize {
        self.flush_count
    }
}

impl<T: Record> Default for MemoryRecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> RecordStore<T> for MemoryRecordStore<T> {
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
        self.flush_count += 1;
        Ok(())
    }

    fn restore(&mut self, records: Vec<T>) {
        self.records = records;
    }
}
