use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    marker::PhantomData,
    path::PathBuf,
    sync::Mutex,
};

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{RecordStore, StoreError, StoreResult};

/// Persists the collection as a single pretty-printed JSON array.
#[derive(Debug)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    // Serializes load/save inside the process; no cross-process locking.
    lock: Mutex<()>,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Opens the store at `path`, creating parent directories and an empty
    /// collection file when nothing exists there yet.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = Self {
            path: path.into(),
            lock: Mutex::new(()),
            _records: PhantomData,
        };
        store.ensure_file()?;
        Ok(store)
    }

    fn ensure_file(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
            }
        }
        if !self.path.exists() {
            debug!(path = %self.path.display(), "initializing empty record file");
            self.save(&[])?;
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_atomically(&self, bytes: &[u8]) -> StoreResult<()> {
        let tmp_path = self.temp_path();
        let mut file = File::create(&tmp_path).map_err(|err| StoreError::io(&tmp_path, err))?;
        file.write_all(bytes)
            .and_then(|_| file.sync_all())
            .map_err(|err| StoreError::io(&tmp_path, err))?;
        drop(file);
        fs::rename(&tmp_path, &self.path).map_err(|err| {
            let _ = fs::remove_file(&tmp_path);
            StoreError::io(&self.path, err)
        })
    }
}

impl<T> RecordStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> StoreResult<Vec<T>> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        match serde_json::from_slice::<Vec<T>>(&bytes) {
            Ok(records) => {
                debug!(path = %self.path.display(), count = records.len(), "records loaded");
                Ok(records)
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "could not read records; starting with an empty collection"
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, records: &[T]) -> StoreResult<()> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let bytes = serde_json::to_vec_pretty(records)?;
        self.write_atomically(&bytes)?;
        debug!(path = %self.path.display(), count = records.len(), "records saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: u32,
        label: String,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                id: 1,
                label: "first".into(),
            },
            Row {
                id: 2,
                label: "second".into(),
            },
        ]
    }

    #[test]
    fn open_initializes_missing_file_with_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("rows.json");
        let store = JsonFileStore::<Row>::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "[]");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn open_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        JsonFileStore::<Row>::open(&path).unwrap().save(&rows()).unwrap();
        let reopened = JsonFileStore::<Row>::open(&path).unwrap();
        assert_eq!(reopened.load().unwrap(), rows());
    }

    #[test]
    fn save_replaces_prior_content_and_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::<Row>::open(dir.path().join("rows.json")).unwrap();
        store.save(&rows()).unwrap();
        let mut reversed = rows();
        reversed.reverse();
        store.save(&reversed).unwrap();
        assert_eq!(store.load().unwrap(), reversed);
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn empty_file_loads_as_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        let store = JsonFileStore::<Row>::open(&path).unwrap();
        fs::write(&path, "").unwrap();
        assert!(store.load().unwrap().is_empty());
        fs::write(&path, "  \n").unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_loads_as_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        let store = JsonFileStore::<Row>::open(&path).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert!(store.load().unwrap().is_empty());
        fs::write(&path, r#"[{"id": "x"}]"#).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn deleted_file_loads_as_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        let store = JsonFileStore::<Row>::open(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn unreadable_path_is_an_io_error_not_an_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        fs::create_dir(&path).unwrap();
        let store = JsonFileStore::<Row>::open(&path).unwrap();
        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }), "unexpected error: {err:?}");
    }

    #[test]
    fn save_into_vanished_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        let store = JsonFileStore::<Row>::open(sub.join("rows.json")).unwrap();
        fs::remove_dir_all(&sub).unwrap();
        let err = store.save(&rows()).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }), "unexpected error: {err:?}");
    }
}
