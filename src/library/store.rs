use log::{info, warn};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Failure to persist the installed list
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize installed games: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Flat JSON file holding the ids of installed games
#[derive(Debug, Clone)]
pub struct InstalledStore {
    path: PathBuf,
}

impl InstalledStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the installed ids. A missing or unreadable file is an empty list.
    pub fn load(&self) -> Vec<String> {
        let json_str = match fs::read_to_string(&self.path) {
            Ok(json_str) => json_str,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No installed games file at {}", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        let ids: Vec<String> = match serde_json::from_str(&json_str) {
            Ok(ids) => ids,
            Err(e) => {
                warn!("Ignoring malformed {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        let mut unique: Vec<String> = Vec::with_capacity(ids.len());
        for id in ids {
            if unique.contains(&id) {
                warn!("Dropping duplicate installed id {}", id);
            } else {
                unique.push(id);
            }
        }

        info!("Loaded {} installed games", unique.len());
        unique
    }

    /// Overwrite the file with the given ids
    pub fn save(&self, ids: &[String]) -> Result<(), StoreError> {
        let json_str = serde_json::to_string(ids)?;
        let io_err = |source: io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }

        // Write next to the target so the rename stays on one filesystem
        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(json_str.as_bytes()).map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_then_load_keeps_order() {
        let dir = tempdir().unwrap();
        let store = InstalledStore::new(dir.path().join("installed.json"));
        let ids = vec!["zeta".to_string(), "alpha".to_string(), "mid".to_string()];

        store.save(&ids).unwrap();
        assert_eq!(store.load(), ids);
    }

    #[test]
    fn writes_a_flat_json_array() {
        let dir = tempdir().unwrap();
        let store = InstalledStore::new(dir.path().join("installed.json"));
        store.save(&["game_a".to_string(), "game_b".to_string()]).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, r#"["game_a","game_b"]"#);
    }

    #[test]
    fn missing_or_malformed_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = InstalledStore::new(dir.path().join("installed.json"));
        assert!(store.load().is_empty());

        fs::write(store.path(), "{\"installed\": [").unwrap();
        assert!(store.load().is_empty());

        fs::write(store.path(), "[1, 2]").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn duplicate_ids_collapse() {
        let dir = tempdir().unwrap();
        let store = InstalledStore::new(dir.path().join("installed.json"));
        fs::write(store.path(), r#"["a","b","a"]"#).unwrap();
        assert_eq!(store.load(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn creates_missing_parent_directory() {
        let dir = tempdir().unwrap();
        let store = InstalledStore::new(dir.path().join("state").join("installed.json"));
        store.save(&["a".to_string()]).unwrap();
        assert_eq!(store.load(), vec!["a".to_string()]);
    }
}
