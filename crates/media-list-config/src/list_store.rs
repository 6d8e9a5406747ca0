use anyhow::{Context, Result};
use media_list_models::ListDocument;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// JSON file holding the watch-list document.
///
/// Loading is forgiving: a missing file or one that does not parse yields an
/// empty document (the unreadable file is copied aside first). Saving always
/// rewrites the whole document through a temp file and a rename, so an
/// interrupted write leaves the previous version in place.
pub struct ListStore {
    path: PathBuf,
}

impl ListStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// `<name>.bak`, or `<name>.bak.N` for the first free N so earlier backups survive
    fn backup_path(&self) -> PathBuf {
        let first = with_suffix(&self.path, ".bak");
        if !first.exists() {
            return first;
        }
        (1..)
            .map(|n| with_suffix(&self.path, &format!(".bak.{}", n)))
            .find(|candidate| !candidate.exists())
            .unwrap_or(first)
    }

    fn temp_path(&self) -> PathBuf {
        with_suffix(&self.path, ".tmp")
    }

    pub fn load(&self) -> Result<ListDocument> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("List file {} does not exist, starting empty", self.path.display());
                return Ok(ListDocument::new());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        if content.trim().is_empty() {
            return Ok(ListDocument::new());
        }

        match serde_json::from_str::<ListDocument>(&content) {
            Ok(document) => {
                debug!(
                    "Loaded {} movie(s) from {}",
                    document.movies.len(),
                    self.path.display()
                );
                Ok(document)
            }
            Err(e) => {
                let backup_path = self.backup_path();
                if let Err(backup_err) = std::fs::copy(&self.path, &backup_path) {
                    warn!(
                        "List file {} is not valid ({}) and could not be backed up: {}. Starting with an empty list.",
                        self.path.display(),
                        e,
                        backup_err
                    );
                } else {
                    warn!(
                        "List file {} is not valid ({}). Backed it up to {} and starting with an empty list.",
                        self.path.display(),
                        e,
                        backup_path.display()
                    );
                }
                Ok(ListDocument::new())
            }
        }
    }

    pub fn save(&self, document: &ListDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut content = serde_json::to_string_pretty(document)?;
        content.push('\n');

        let temp_path = self.temp_path();
        std::fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        info!(
            "Saved {} movie(s) to {}",
            document.movies.len(),
            self.path.display()
        );
        Ok(())
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_list_models::Entry;
    use serde_json::{json, Value};

    fn store_in(dir: &tempfile::TempDir) -> ListStore {
        ListStore::new(dir.path().join("watchflip.json"))
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(!store.exists());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty_and_is_backed_up() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ this is not json").unwrap();

        let document = store.load().unwrap();
        assert!(document.is_empty());

        let backup = dir.path().join("watchflip.json.bak");
        assert_eq!(std::fs::read_to_string(backup).unwrap(), "{ this is not json");
    }

    #[test]
    fn test_repeated_corruption_keeps_every_backup() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        for content in ["first broken", "second broken", "third broken"] {
            std::fs::write(store.path(), content).unwrap();
            assert!(store.load().unwrap().is_empty());
        }

        let read = |name: &str| std::fs::read_to_string(dir.path().join(name)).unwrap();
        assert_eq!(read("watchflip.json.bak"), "first broken");
        assert_eq!(read("watchflip.json.bak.1"), "second broken");
        assert_eq!(read("watchflip.json.bak.2"), "third broken");
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut document = ListDocument::new();
        document.movies.push(Entry::new(603, "The Matrix", 1999, 7.6));
        let mut watched = Entry::new(680, "Pulp Fiction", 1994, 8.5);
        watched.completed = true;
        document.movies.push(watched);
        document.movies_config.set_api_key("secret".to_string());
        document.extra.insert("note".to_string(), json!("kept"));

        store.save(&document).unwrap();
        let first = std::fs::read_to_string(store.path()).unwrap();

        let loaded = store.load().unwrap();
        store.save(&loaded).unwrap();
        let second = std::fs::read_to_string(store.path()).unwrap();

        assert_eq!(first, second);
        let value: Value = serde_json::from_str(&second).unwrap();
        assert_eq!(value["movies"]["603"]["title"], "The Matrix");
        assert_eq!(value["movies"]["680"]["completed"], true);
        assert_eq!(value["movies_config"]["api_key"], "secret");
        assert_eq!(value["note"], "kept");
        assert!(!dir.path().join("watchflip.json.tmp").exists());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = ListStore::new(dir.path().join("a").join("b").join("list.json"));
        store.save(&ListDocument::new()).unwrap();
        assert!(store.exists());
    }

    #[test]
    fn test_unreadable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be cannot be read as a string
        let store = ListStore::new(dir.path());
        assert!(store.load().is_err());
    }
}
