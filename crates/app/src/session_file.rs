//! File-backed session store.
//!
//! All keys live in one JSON object in the platform data directory, rewritten
//! atomically on every change. A missing file is an empty store; an unreadable
//! one is set aside as empty too, with a warning for the caller to surface.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use whowho_core::{SessionStore, StoreError};

use crate::APP_NAME;

pub const DATA_DIR_ENV: &str = "WHOWHO_DATA_DIR";
const STORE_FILE_NAME: &str = "local_storage.json";
const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct StoreFile {
    format_version: u32,
    entries: BTreeMap<String, String>,
}

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    open_warning: Option<String>,
}

impl FileStore {
    /// `WHOWHO_DATA_DIR` wins over the platform data directory.
    pub fn default_path() -> Option<PathBuf> {
        let override_dir = env::var(DATA_DIR_ENV).ok();
        resolve_store_path(override_dir.as_deref())
    }

    pub fn open(path: &Path) -> Self {
        let (entries, open_warning) = match read_entries(path) {
            Ok(entries) => (entries, None),
            Err(err) if err.kind() == io::ErrorKind::NotFound => (BTreeMap::new(), None),
            Err(err) => (
                BTreeMap::new(),
                Some(format!("ignored unreadable store {}: {err}", path.display())),
            ),
        };
        Self { path: path.to_path_buf(), entries, open_warning }
    }

    pub fn open_warning(&self) -> Option<&str> {
        self.open_warning.as_deref()
    }

    /// Persists `entries` and only then adopts them, so memory never runs ahead of disk.
    fn commit(&mut self, entries: BTreeMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let file = StoreFile { format_version: FORMAT_VERSION, entries };
        let json = serde_json::to_string_pretty(&file).map_err(io::Error::other)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;

        self.entries = file.entries;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.entries.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        let mut entries = self.entries.clone();
        entries.insert(key.to_string(), value.to_string());
        self.commit(entries)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut entries = self.entries.clone();
        entries.remove(key);
        self.commit(entries)?;
        Ok(())
    }
}

pub fn resolve_store_path(override_dir: Option<&str>) -> Option<PathBuf> {
    if let Some(dir) = override_dir.map(str::trim).filter(|dir| !dir.is_empty()) {
        return Some(Path::new(dir).join(STORE_FILE_NAME));
    }
    ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
        let mut path = proj_dirs.data_dir().to_path_buf();
        path.push(STORE_FILE_NAME);
        path
    })
}

fn read_entries(path: &Path) -> io::Result<BTreeMap<String, String>> {
    let content = fs::read_to_string(path)?;
    let file: StoreFile = serde_json::from_str(&content)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(file.entries)
}
