//! Local persisted client state.
//!
//! A small JSON key/value file standing in for browser local storage. The
//! API credential lives under a fixed key.

use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Storage key of the API credential
pub const API_KEY_STORAGE_KEY: &str = "openrouter_api_key";

/// Environment override for the storage file
pub const STORAGE_ENV: &str = "PROMPTCRAFT_STORAGE";

#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl CredentialStore {
    /// `$PROMPTCRAFT_STORAGE`, else `<config_dir>/promptcraft/storage.json`
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(STORAGE_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("promptcraft")
            .join("storage.json")
    }

    pub fn load() -> Self {
        Self::at(Self::default_path())
    }

    /// Open the store at `path`. A missing file is an empty store; an
    /// unreadable or corrupt one is logged and treated as empty.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::try_at(&path) {
            Ok(store) => store,
            Err(e) => {
                warn!("Ignoring storage file {}: {}", path.display(), e);
                Self {
                    path,
                    values: BTreeMap::new(),
                }
            }
        }
    }

    /// Open the store at `path`, failing on an unreadable or corrupt file.
    pub fn try_at(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn api_key(&self) -> Option<&str> {
        self.values
            .get(API_KEY_STORAGE_KEY)
            .map(String::as_str)
            .filter(|k| !k.is_empty())
    }

    pub fn set_api_key(&mut self, key: impl Into<String>) -> Result<()> {
        self.values.insert(API_KEY_STORAGE_KEY.to_string(), key.into());
        self.save()
    }

    pub fn clear_api_key(&mut self) -> Result<()> {
        self.values.remove(API_KEY_STORAGE_KEY);
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Show only the first and last characters of a key.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_key_persists_across_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = CredentialStore::at(&path);
        assert!(store.api_key().is_none());
        store.set_api_key("sk-or-v1-abcdef123456").unwrap();

        let reopened = CredentialStore::at(&path);
        assert_eq!(reopened.api_key(), Some("sk-or-v1-abcdef123456"));

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains(API_KEY_STORAGE_KEY));
    }

    #[test]
    fn test_clear_removes_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let mut store = CredentialStore::at(&path);
        store.set_api_key("sk-or-v1-abcdef").unwrap();
        store.clear_api_key().unwrap();
        assert!(CredentialStore::at(&path).api_key().is_none());
    }

    #[test]
    fn test_corrupt_file_is_empty_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();
        assert!(CredentialStore::at(&path).api_key().is_none());
    }

    #[test]
    fn test_try_at_reports_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        assert!(CredentialStore::try_at(&path).unwrap().api_key().is_none());

        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            CredentialStore::try_at(&path),
            Err(crate::error::PromptcraftError::Json(_))
        ));
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("sk-or-v1-0123456789"), "sk-or-...6789");
        assert_eq!(mask_key("short"), "*****");
    }
}
