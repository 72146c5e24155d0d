use crate::profile::Profile;
use crate::HandyError;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;
use tracing::{info, warn};

pub const PROFILE_KEY: &str = "handyUserData";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage rejected write to `{key}`: {reason}")]
    WriteRejected { key: String, reason: String },
    #[error("storage is unavailable")]
    Unavailable,
}

/// Durable string key-value storage scoped to the browser origin.
///
/// Reads never fail: an unreadable key is reported as absent.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store. Clones share the same backing map, so a clone handed to
/// the app can be inspected afterwards.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    reject_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        store
    }

    /// Make every subsequent `set` fail, as a full quota would.
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.reject_writes.get() {
            return Err(StorageError::WriteRejected {
                key: key.to_owned(),
                reason: "quota exceeded".to_owned(),
            });
        }
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Result of reading the stored profile. Both `Absent` and `Malformed` mean
/// "use markup defaults"; they are kept apart so the fallback is observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Absent,
    Malformed { reason: String },
    Loaded(Profile),
}

impl LoadOutcome {
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            LoadOutcome::Loaded(profile) => Some(profile),
            LoadOutcome::Absent | LoadOutcome::Malformed { .. } => None,
        }
    }

    pub fn into_profile(self) -> Option<Profile> {
        match self {
            LoadOutcome::Loaded(profile) => Some(profile),
            LoadOutcome::Absent | LoadOutcome::Malformed { .. } => None,
        }
    }
}

/// Reads and writes the single profile record under a fixed key.
pub struct ProfileStore<K> {
    store: K,
    key: String,
}

impl<K> ProfileStore<K>
where
    K: KeyValueStore,
{
    pub fn new(store: K) -> Self {
        Self::with_key(store, PROFILE_KEY)
    }

    pub fn with_key(store: K, key: &str) -> Self {
        Self {
            store,
            key: key.to_owned(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn inner(&self) -> &K {
        &self.store
    }

    pub fn load(&self) -> LoadOutcome {
        let Some(raw) = self.store.get(&self.key) else {
            info!(key = %self.key, "no stored profile");
            return LoadOutcome::Absent;
        };
        match Profile::from_json(&raw) {
            Ok(profile) => {
                info!(key = %self.key, hobbies = profile.hobbies.len(), "loaded stored profile");
                LoadOutcome::Loaded(profile)
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "ignoring unreadable stored profile");
                LoadOutcome::Malformed {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Overwrite the stored record with `profile`.
    pub fn save(&self, profile: &Profile) -> Result<(), HandyError> {
        let raw = profile.to_json()?;
        self.store.set(&self.key, &raw)?;
        info!(key = %self.key, bytes = raw.len(), "stored profile");
        Ok(())
    }
}
