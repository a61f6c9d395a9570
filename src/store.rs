//! JSON File Persistence
//!
//! Inventory and workspaces are small, so each is stored as one JSON document
//! that is read whole and written whole. Writes go to a sibling temp file and
//! are renamed into place. A missing file reads as the empty default.
//!
//! No locking happens here; callers serialize writers.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::compressor::Workspace;
use crate::inventory::Inventory;

const MAX_USER_ID_LEN: usize = 64;

/// One JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), _marker: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<T> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No store file at {:?}, starting empty", self.path);
                return Ok(T::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read store file: {:?}", self.path))
            }
        };

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse store file: {:?}", self.path))
    }

    pub fn write(&self, value: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create store directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(value).context("Failed to serialize store")?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .with_context(|| format!("Failed to write store file: {:?}", tmp_path))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace store file: {:?}", self.path))?;

        tracing::debug!("Wrote store file {:?}", self.path);
        Ok(())
    }

    /// Read, apply `f`, write back; returns what `f` returned
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R> {
        let mut value = self.read()?;
        let out = f(&mut value);
        self.write(&value)?;
        Ok(out)
    }

    /// Like `update`, but the file is only written when `f` succeeds
    ///
    /// The outer error is I/O; the inner one is `f`'s own.
    pub fn try_update<R, E>(&self, f: impl FnOnce(&mut T) -> Result<R, E>) -> Result<Result<R, E>> {
        let mut value = self.read()?;
        match f(&mut value) {
            Ok(out) => {
                self.write(&value)?;
                Ok(Ok(out))
            }
            Err(e) => Ok(Err(e)),
        }
    }
}

pub type InventoryStore = JsonFileStore<Inventory>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid user id {0:?}: use 1-64 letters, digits, '-' or '_'")]
pub struct InvalidUserId(pub String);

/// Check a user id is safe to use as a file name
pub fn validate_user_id(user: &str) -> Result<&str, InvalidUserId> {
    let valid = !user.is_empty()
        && user.len() <= MAX_USER_ID_LEN
        && user.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(user)
    } else {
        Err(InvalidUserId(user.to_string()))
    }
}

/// One workspace file per user under `<dir>/`
#[derive(Debug, Clone)]
pub struct WorkspaceStore {
    dir: PathBuf,
}

impl WorkspaceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store for one user's workspace
    pub fn for_user(&self, user: &str) -> Result<JsonFileStore<Workspace>, InvalidUserId> {
        let user = validate_user_id(user)?;
        Ok(JsonFileStore::new(self.dir.join(format!("{}.json", user))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionInput;

    #[test]
    fn test_missing_file_reads_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = InventoryStore::new(dir.path().join("inventory.json"));
        assert!(store.read().unwrap().is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = InventoryStore::new(dir.path().join("nested/inventory.json"));

        let mut inv = Inventory::default();
        inv.add("12 AWG", 3).unwrap();
        store.write(&inv).unwrap();

        assert_eq!(store.read().unwrap(), inv);
        assert!(!dir.path().join("nested/inventory.json.tmp").exists());
    }

    #[test]
    fn test_update_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = InventoryStore::new(dir.path().join("inventory.json"));

        let qty = store
            .update(|inv| inv.add("8 AWG", 10).map(|s| s.quantity))
            .unwrap()
            .unwrap();
        assert_eq!(qty, 1);
        assert_eq!(store.read().unwrap().get("8AWG-10M").unwrap().quantity, 1);
    }

    #[test]
    fn test_failed_update_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        let store = InventoryStore::new(&path);

        let outcome = store.try_update(|inv| inv.remove("8 AWG", 10)).unwrap();
        assert!(outcome.is_err());
        assert!(!path.exists(), "no file is created for a rejected change");

        store.try_update(|inv| inv.add("8 AWG", 10).map(|_| ())).unwrap().unwrap();
        let before = fs::read_to_string(&path).unwrap();
        let outcome = store.try_update(|inv| inv.remove("8 AWG", 12)).unwrap();
        assert!(outcome.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        fs::write(&path, "{ not json").unwrap();
        let err = InventoryStore::new(&path).read().unwrap_err();
        assert!(err.to_string().contains("Failed to parse store file"));
    }

    #[test]
    fn test_workspaces_are_per_user() {
        let dir = tempfile::tempdir().unwrap();
        let workspaces = WorkspaceStore::new(dir.path());

        let alice = workspaces.for_user("alice").unwrap();
        alice
            .update(|ws| {
                ws.add("C1", SelectionInput::new(20.0, 30.0));
            })
            .unwrap();

        let bob = workspaces.for_user("bob").unwrap();
        assert!(bob.read().unwrap().compressors.is_empty());
        assert_eq!(alice.read().unwrap().compressors.len(), 1);
    }

    #[test]
    fn test_user_id_validation() {
        assert!(validate_user_id("user_01-a").is_ok());
        assert!(validate_user_id("").is_err());
        assert!(validate_user_id("../etc").is_err());
        assert!(validate_user_id(&"x".repeat(65)).is_err());
    }
}
