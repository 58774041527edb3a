use std::path::PathBuf;

use scout_core::{Contact, ResultEntry, SessionSnapshot};
use scout_engine::{encode_item, LocalStorage, StorageError};
use scout_logging::{scout_error, scout_info, scout_warn};

/// Storage key of the source URL.
pub const URL_KEY: &str = "url";
/// Storage key of the serialized result entries.
pub const RESULTS_KEY: &str = "postLinks";

/// Reads and writes the `(url, postLinks)` pair as one unit.
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: LocalStorage,
}

impl SessionStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage: LocalStorage::new(data_dir),
        }
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    /// Loads the saved session. Unreadable state is wiped and reported as absent.
    pub fn restore(&self) -> Option<SessionSnapshot> {
        match self.try_restore() {
            Ok(Some(snapshot)) => {
                scout_info!(
                    "Restored session for {} with {} results",
                    snapshot.source_url,
                    snapshot.results.len()
                );
                Some(snapshot)
            }
            Ok(None) => None,
            Err(err) => {
                scout_warn!("Discarding unreadable saved session: {}", err);
                if let Err(err) = self.storage.clear() {
                    scout_error!("Failed to clear local storage: {}", err);
                }
                None
            }
        }
    }

    fn try_restore(&self) -> Result<Option<SessionSnapshot>, StorageError> {
        if !self.storage.contains_key(URL_KEY)? || !self.storage.contains_key(RESULTS_KEY)? {
            return Ok(None);
        }
        let source_url = self.storage.get_item::<String>(URL_KEY)?.unwrap_or_default();
        let results = self
            .storage
            .get_item::<Vec<ResultEntry>>(RESULTS_KEY)?
            .unwrap_or_default();
        Ok(Some(SessionSnapshot {
            source_url,
            results,
        }))
    }

    pub fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StorageError> {
        self.storage.set_items(&[
            (URL_KEY, encode_item(URL_KEY, &snapshot.source_url)?),
            (RESULTS_KEY, encode_item(RESULTS_KEY, &snapshot.results)?),
        ])?;
        scout_info!(
            "Saved session for {} with {} results",
            snapshot.source_url,
            snapshot.results.len()
        );
        Ok(())
    }

    /// Renames the stored contact with the same phone number.
    /// Returns `false` when nothing stored matches.
    pub fn update_contact(&self, contact: &Contact) -> Result<bool, StorageError> {
        let Some(mut stored) = self.storage.get_item::<Vec<ResultEntry>>(RESULTS_KEY)? else {
            return Ok(false);
        };
        let Some(entry) = stored
            .iter_mut()
            .find(|entry| entry.phone_number() == contact.phone_number)
        else {
            return Ok(false);
        };
        entry.contact.name = contact.name.clone();
        self.storage.set_item(RESULTS_KEY, &stored)?;
        Ok(true)
    }
}
