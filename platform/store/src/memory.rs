use std::sync::Mutex;

use crate::{RecordStore, StoreError, StoreResult};

/// Keeps the "persisted" collection in process memory. Useful for tests and
/// for embedding the service without touching disk.
#[derive(Debug, Default)]
pub struct MemoryStore<T> {
    records: Mutex<Vec<T>>,
}

impl<T: Clone> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    /// Copy of whatever the last successful save wrote.
    pub fn snapshot(&self) -> StoreResult<Vec<T>> {
        self.records
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| StoreError::Poisoned)
    }
}

impl<T: Clone> RecordStore<T> for MemoryStore<T> {
    fn load(&self) -> StoreResult<Vec<T>> {
        let guard = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.clone())
    }

    fn save(&self, records: &[T]) -> StoreResult<()> {
        let mut guard = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        *guard = records.to_vec();
        Ok(())
    }
}
