use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use scout_logging::scout_debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::persist::{AtomicFileWriter, PersistError};

pub const STORAGE_FILENAME: &str = ".scout_storage.ron";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("storage file is malformed: {0}")]
    Format(String),
    #[error("value for key {key:?} is malformed: {source}")]
    Json {
        key: String,
        source: serde_json::Error,
    },
}

/// Browser-style key/value storage kept in one RON file.
///
/// Values are stored as JSON text, so a single item can be corrupt while the
/// file itself still parses. Every call reads the file afresh.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
    writer: AtomicFileWriter,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            writer: AtomicFileWriter::new(dir.clone()),
            dir,
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(STORAGE_FILENAME)
    }

    pub fn contains_key(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.load()?.contains_key(key))
    }

    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let map = self.load()?;
        let Some(raw) = map.get(key) else {
            return Ok(None);
        };
        serde_json::from_str(raw)
            .map(Some)
            .map_err(|source| StorageError::Json {
                key: key.to_string(),
                source,
            })
    }

    pub fn set_item<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        self.set_items(&[(key, encode_item(key, value)?)])
    }

    /// Writes several already-encoded items in one file replacement.
    pub fn set_items(&self, items: &[(&str, String)]) -> Result<(), StorageError> {
        let mut map = self.load()?;
        for (key, value) in items {
            map.insert((*key).to_string(), value.clone());
        }
        self.store(&map)
    }

    pub fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self.load()?;
        if map.remove(key).is_some() {
            self.store(&map)?;
        }
        Ok(())
    }

    /// Drops every key, including a storage file that no longer parses.
    pub fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        load_map(&self.path())
    }

    fn store(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(map, pretty)
            .map_err(|err| StorageError::Format(err.to_string()))?;
        let path = self.writer.write(STORAGE_FILENAME, &content)?;
        scout_debug!("Wrote {} storage keys to {:?}", map.len(), path);
        Ok(())
    }
}

/// Encodes a value the way [`LocalStorage::set_item`] stores it.
pub fn encode_item<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|source| StorageError::Json {
        key: key.to_string(),
        source,
    })
}

fn load_map(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(err) => return Err(err.into()),
    };
    ron::from_str(&content).map_err(|err| StorageError::Format(err.to_string()))
}
