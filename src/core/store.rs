//! Local key-value persistence for the base URL override and the session
//!
//! The on-disk format is a flat YAML map so it can be inspected by hand.

use miette::Diagnostic;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::core::session::Session;
use crate::yaml::{read_yaml_file, YamlError};

/// Key holding the user's base URL override
pub const BASE_URL_KEY: &str = "baseUrl";

/// Key holding the serialized session (JSON)
pub const SESSION_KEY: &str = "userData";

/// Errors that can occur while reading or writing the local store
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("Failed to write store file {path}: {source}")]
    #[diagnostic(code(mxf::store::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Read(#[from] YamlError),

    #[error("Stored session is corrupt: {0}")]
    #[diagnostic(code(mxf::store::session), help("run `mxf logout` to discard it"))]
    CorruptSession(#[from] serde_json::Error),
}

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Load the persisted session, if any
pub fn load_session(store: &dyn KeyValueStore) -> Result<Option<Session>, StoreError> {
    match store.get(SESSION_KEY)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Persist a session, replacing any previous one
pub fn save_session(store: &mut dyn KeyValueStore, session: &Session) -> Result<(), StoreError> {
    let raw = serde_json::to_string(session)?;
    store.set(SESSION_KEY, &raw)
}

/// Forget the persisted session
pub fn clear_session(store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
    store.remove(SESSION_KEY)
}

/// Base URL override saved with `mxf config set-url`
pub fn base_url_override(store: &dyn KeyValueStore) -> Result<Option<String>, StoreError> {
    Ok(store
        .get(BASE_URL_KEY)?
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// YAML file backed store
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = read_yaml_file::<BTreeMap<String, String>>(&path)?.unwrap_or_default();
        Ok(Self { path, entries })
    }

    /// Open the store, discarding a file that cannot be read
    ///
    /// Used where stale credentials must go even if the file is damaged.
    pub fn open_or_reset(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        match Self::open(&path) {
            Ok(store) => Ok(store),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "discarding unreadable store");
                let mut store = Self {
                    path,
                    entries: BTreeMap::new(),
                };
                store.clear()?;
                Ok(store)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let content = serde_yml::to_string(&self.entries)
            .map_err(|e| write_err(std::io::Error::other(e.to_string())))?;
        fs::write(&self.path, content).map_err(write_err)?;

        // The store holds credentials
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(write_err)?;
        }

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        self.flush()
    }
}

/// In-memory store, used by tests and embedders that manage persistence themselves
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        Ok(())
    }
}
