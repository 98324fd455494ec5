//! Anonymous per-device identity.
//!
//! # Design
//! The identity is one string kept under a fixed key in a small persistent
//! key/value store. `IdentityProvider` owns the store and is handed to
//! [`RewardsApi`](crate::RewardsApi), so tests can inject a [`MemoryStore`]
//! while the CLI uses a [`FileStore`].
//!
//! Storage failures are always returned. Silently falling back to an
//! in-memory id would orphan the user's balance and history.

use std::collections::{BTreeMap, HashMap};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::info;
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::UserId;

/// Key under which the identity is persisted.
pub const USER_ID_KEY: &str = "eco_bonus_user_id";

const SUFFIX_LEN: usize = 7;

/// Minimal persistent key/value storage.
pub trait IdentityStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Process-local store. Forgets everything on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

impl IdentityStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// A JSON object on disk holding string entries.
///
/// Every call re-reads the file, so edits from other processes are seen.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent).map_err(io_err)?;
                parent
            }
            None => Path::new("."),
        };
        let json = serde_json::to_string_pretty(entries).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        // Replace the file in one rename so a crash never leaves it half written.
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(json.as_bytes()).map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

impl IdentityStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read()?;
        entries.insert(key.to_string(), value.to_string());
        self.write(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.read()?;
        if entries.remove(key).is_some() {
            self.write(&entries)?;
        }
        Ok(())
    }
}

/// Produces and persists the anonymous user identifier.
#[derive(Debug)]
pub struct IdentityProvider<S> {
    store: S,
}

impl<S: IdentityStore> IdentityProvider<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Return the persisted identity, creating and saving one on first use.
    ///
    /// An empty stored value counts as absent.
    pub fn get_identity(&self) -> Result<UserId, StoreError> {
        if let Some(existing) = self.store.get(USER_ID_KEY)?.filter(|id| !id.is_empty()) {
            return Ok(UserId::new(existing));
        }
        let id = generate_user_id();
        self.store.set(USER_ID_KEY, id.as_str())?;
        info!(user_id = %id, "generated new user id");
        Ok(id)
    }

    /// Overwrite the identity. The token's shape is not checked.
    pub fn set_identity(&self, token: &str) -> Result<(), StoreError> {
        self.store.set(USER_ID_KEY, token)
    }

    /// Forget the identity; the next `get_identity` creates a fresh one.
    pub fn clear_identity(&self) -> Result<(), StoreError> {
        self.store.remove(USER_ID_KEY)
    }
}

/// `user_<unix millis>_<7 lowercase base-36 chars>`.
fn generate_user_id() -> UserId {
    let millis = chrono::Utc::now().timestamp_millis();
    let mut entropy = Uuid::new_v4().as_u128();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| {
            let digit = (entropy % 36) as u32;
            entropy /= 36;
            char::from_digit(digit, 36).unwrap_or('0')
        })
        .collect();
    UserId::new(format!("user_{millis}_{suffix}"))
}
