//! Preference store backed by a small JSON document on disk.
//!
//! Layout:
//!
//! ```json
//! { "sorting_type": "distance", "favorite_lots": ["Altmarkt", "Messe"] }
//! ```
//!
//! Writes go to a sibling temp file which is then renamed over the target, so
//! a crash mid-write leaves the previous document intact.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use lotlist_core::{PreferenceError, PreferenceStore, SortMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    sorting_type: Option<String>,
    #[serde(default)]
    favorite_lots: Vec<String>,
}

#[derive(Debug)]
pub struct JsonFilePreferences {
    path: PathBuf,
    sort_mode: SortMode,
    favorites: BTreeSet<String>,
}

impl JsonFilePreferences {
    /// Open the store at `path`.
    ///
    /// A missing file means nothing has been saved yet. An unreadable or
    /// malformed file is logged and treated the same way; it is overwritten
    /// on the next write.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let doc = read_document(&path).unwrap_or_default();
        let sort_mode = doc
            .sorting_type
            .as_deref()
            .map_or(SortMode::Default, SortMode::from_key);
        let favorites: BTreeSet<String> = doc.favorite_lots.into_iter().collect();
        tracing::debug!(
            path = %path.display(),
            sort_mode = %sort_mode,
            favorites = favorites.len(),
            "opened preference file"
        );
        Self {
            path,
            sort_mode,
            favorites,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), PreferenceError> {
        let doc = Document {
            sorting_type: Some(self.sort_mode.key().to_owned()),
            favorite_lots: self.favorites.iter().cloned().collect(),
        };
        let body = serde_json::to_vec_pretty(&doc).map_err(|e| PreferenceError::Encode {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> PreferenceError {
        PreferenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

fn read_document(path: &Path) -> Option<Document> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read preference file");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(doc) => Some(doc),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed preference file");
            None
        }
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    fn set_sort_mode(&mut self, mode: SortMode) -> Result<(), PreferenceError> {
        self.sort_mode = mode;
        self.persist()
    }

    fn favorites(&self) -> BTreeSet<String> {
        self.favorites.clone()
    }

    fn set_favorites(&mut self, favorites: &BTreeSet<String>) -> Result<(), PreferenceError> {
        self.favorites.clone_from(favorites);
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn favs(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn missing_file_reads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFilePreferences::open(dir.path().join("prefs.json"));
        assert_eq!(store.sort_mode(), SortMode::Default);
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut store = JsonFilePreferences::open(&path);
        store.set_sort_mode(SortMode::Distance).unwrap();
        store.set_favorites(&favs(&["Messe", "Altmarkt"])).unwrap();

        let reopened = JsonFilePreferences::open(&path);
        assert_eq!(reopened.sort_mode(), SortMode::Distance);
        assert_eq!(reopened.favorites(), favs(&["Altmarkt", "Messe"]));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn document_uses_persisted_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let mut store = JsonFilePreferences::open(&path);
        store.set_sort_mode(SortMode::FreeSpaces).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["sorting_type"], "free");
        assert_eq!(raw["favorite_lots"], serde_json::json!([]));
    }

    #[test]
    fn unknown_sort_key_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"sorting_type": "euclidean", "favorite_lots": ["A", "A"]}"#).unwrap();

        let store = JsonFilePreferences::open(&path);
        assert_eq!(store.sort_mode(), SortMode::Default);
        assert_eq!(store.favorites(), favs(&["A"]));
    }

    #[test]
    fn malformed_file_reads_defaults_and_is_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{ not json").unwrap();

        let mut store = JsonFilePreferences::open(&path);
        assert_eq!(store.sort_mode(), SortMode::Default);
        store.set_sort_mode(SortMode::Alphabetical).unwrap();

        assert_eq!(
            JsonFilePreferences::open(&path).sort_mode(),
            SortMode::Alphabetical
        );
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("prefs.json");
        let mut store = JsonFilePreferences::open(&path);
        store.set_favorites(&favs(&["Zwinger"])).unwrap();
        assert!(path.exists());
        assert_eq!(store.path(), path.as_path());
    }

    #[test]
    fn write_into_a_file_path_parent_fails_with_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let mut store = JsonFilePreferences::open(blocker.join("prefs.json"));
        let err = store.set_sort_mode(SortMode::Distance).unwrap_err();
        assert!(matches!(err, PreferenceError::Io { .. }), "got: {err:?}");
        assert_eq!(store.sort_mode(), SortMode::Distance);
    }
}
