//! Login credential storage
//!
//! The Hub issues a token on login that must accompany rating, upload and
//! delete calls, along with the user's id, which uploads are attributed to
//! and "my resources" is listed by. Both are read from the store on every
//! request, so a logout takes effect immediately.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What a successful login leaves behind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub token: String,
    /// Hub user id; absent when the login reply did not carry one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

impl Credentials {
    pub fn new(token: impl Into<String>, user_id: Option<u64>) -> Self {
        Self {
            token: token.into(),
            user_id,
        }
    }
}

/// Where the login credentials live
pub trait CredentialStore: Send + Sync + std::fmt::Debug {
    /// Current credentials, `None` when logged out
    fn load(&self) -> Result<Option<Credentials>>;

    fn save(&self, credentials: &Credentials) -> Result<()>;

    /// Forget token and user id; clearing an empty store is not an error
    fn clear(&self) -> Result<()>;
}

/// JSON file under the user's config directory
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/tekhub/credentials.json`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tekhub").join("credentials.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credentials>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Credentials>(&content) {
            Ok(stored) if !stored.token.is_empty() => Ok(Some(stored)),
            Ok(_) => Ok(None),
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable credentials file {}: {}",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    fn save(&self, credentials: &Credentials) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            serde_json::to_string_pretty(credentials).map_err(std::io::Error::other)?;

        std::fs::write(&self.path, content)?;
        tracing::debug!("Saved credentials to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-local store, used in tests
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credentials: Mutex<Option<Credentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self::with_credentials(Credentials::new(token, None))
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials: Mutex::new(Some(credentials)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credentials>> {
        Ok(self.credentials.lock().map_err(poisoned)?.clone())
    }

    fn save(&self, credentials: &Credentials) -> Result<()> {
        *self.credentials.lock().map_err(poisoned)? = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.credentials.lock().map_err(poisoned)? = None;
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> std::io::Error {
    std::io::Error::other("credential store lock poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested").join("credentials.json"));

        assert_eq!(store.load().unwrap(), None);

        store.save(&Credentials::new("abc123", Some(42))).unwrap();
        let reopened = FileCredentialStore::new(store.path());
        let loaded = reopened.load().unwrap().unwrap();
        assert_eq!(loaded.token, "abc123");
        assert_eq!(loaded.user_id, Some(42));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_ignores_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileCredentialStore::new(&path);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_reads_token_only_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, r#"{"token":"old"}"#).unwrap();

        let loaded = FileCredentialStore::new(&path).load().unwrap().unwrap();
        assert_eq!(loaded, Credentials::new("old", None));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryCredentialStore::with_token("t");
        assert_eq!(store.load().unwrap().map(|c| c.token).as_deref(), Some("t"));
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_default_path_under_tekhub() {
        if let Some(path) = FileCredentialStore::default_path() {
            assert!(path.ends_with("tekhub/credentials.json"));
        }
    }
}
