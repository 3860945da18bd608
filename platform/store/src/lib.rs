//! Persistence primitives. A store round-trips an entire ordered collection
//! as one unit; it knows nothing about the records it holds.

mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode collection: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Whole-collection load/save boundary.
pub trait RecordStore<T> {
    /// Returns the persisted collection in insertion order. Missing, empty or
    /// unparseable data yields an empty collection; failing to read the
    /// medium at all is an error.
    fn load(&self) -> StoreResult<Vec<T>>;

    /// Replaces everything previously persisted with `records`.
    fn save(&self, records: &[T]) -> StoreResult<()>;
}

impl<T, S> RecordStore<T> for &S
where
    S: RecordStore<T> + ?Sized,
{
    fn load(&self) -> StoreResult<Vec<T>> {
        (**self).load()
    }

    fn save(&self, records: &[T]) -> StoreResult<()> {
        (**self).save(records)
    }
}

pub const DEFAULT_DATA_FILE: &str = "data/employees.json";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_path() {
        let err = StoreError::io(
            "/nowhere/records.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/nowhere/records.json"));
        assert!(msg.contains("denied"));
    }
}
