//! Saved recipes ("recipe book") persistence.
//!
//! Records live in a flat key-value store under `cookie-recipe<id>` keys, each
//! value being the JSON-serialized [`SavedRecipeRecord`]. The default backend
//! is [`FileStore`], a single JSON object file that is re-read on every call
//! and replaced atomically on every write, so separate invocations always see
//! each other's changes. Writers hold an exclusive lock on a sibling `.lock`
//! file for the whole read-modify-write.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, RecipeCard, Result};

/// Prefix of every saved-recipe key.
pub const SAVED_KEY_PREFIX: &str = "cookie-recipe";

/// File name of the store inside the data directory.
pub const STORE_FILENAME: &str = "saved-recipes.json";

/// Store key for a recipe id.
#[must_use]
pub fn saved_key(id: &str) -> String {
    format!("{SAVED_KEY_PREFIX}{id}")
}

/// Flat string key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Write or overwrite `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Delete `key`; absent keys are not an error.
    fn remove(&self, key: &str) -> Result<()>;
    /// All keys currently stored.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Key-value store backed by a single JSON object file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/saved-recipes.json`, creating the directory.
    pub fn in_dir(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .map_err(|e| Error::Storage(format!("Failed to create data directory: {e}")))?;
        Ok(Self::new(data_dir.join(STORE_FILENAME)))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("json.lock")
    }

    /// Exclusive writer lock, released when the returned handle is dropped.
    fn lock(&self) -> Result<File> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("Failed to create data directory: {e}")))?;
        }
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(self.lock_path())
            .map_err(|e| Error::Storage(format!("Failed to open store lock: {e}")))?;
        lock.lock_exclusive()
            .map_err(|e| Error::Storage(format!("Failed to lock store: {e}")))?;
        Ok(lock)
    }

    /// Run a read-modify-write cycle under the writer lock.
    fn update<T>(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> (T, bool)) -> Result<T> {
        let _lock = self.lock()?;
        let mut entries = self.read_entries()?;
        let (out, changed) = f(&mut entries);
        if changed {
            self.write_entries(&entries)?;
        }
        Ok(out)
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<BTreeMap<String, String>>(&bytes) {
                Ok(entries) => Ok(entries),
                Err(err) => {
                    warn!(
                        "failed to parse {} at {}: {err}; treating as empty",
                        STORE_FILENAME,
                        self.path.display()
                    );
                    Ok(BTreeMap::new())
                },
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(Error::Storage(format!(
                "Failed to read {}: {err}",
                self.path.display()
            ))),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("Failed to create data directory: {e}")))?;
        }
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| Error::Storage(format!("Failed to serialize saved recipes: {e}")))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .map_err(|e| Error::Storage(format!("Failed to write temp store: {e}")))?;

        #[cfg(target_os = "windows")]
        if self.path.exists() {
            fs::remove_file(&self.path)
                .map_err(|e| Error::Storage(format!("Failed to remove existing store: {e}")))?;
        }
        if let Err(err) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(Error::Storage(format!("Failed to persist store: {err}")));
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            ((), true)
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|entries| ((), entries.remove(key).is_some()))
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.read_entries()?.into_keys().collect())
    }
}

/// In-process key-value store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> T) -> Result<T> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| Error::Storage("memory store lock poisoned".into()))?;
        Ok(f(&mut guard))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.with_entries(|entries| entries.keys().cloned().collect())
    }
}

/// Persisted recipe summary: the lookup response restricted to card fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRecipeRecord {
    /// Card fields of the saved recipe.
    pub recipe: RecipeCard,
}

impl From<RecipeCard> for SavedRecipeRecord {
    fn from(recipe: RecipeCard) -> Self {
        Self { recipe }
    }
}

/// Outcome of [`SavedRecipeStore::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SavedState {
    /// The recipe was added to the recipe book.
    Added,
    /// The recipe was removed from the recipe book.
    Removed,
}

impl SavedState {
    /// User-facing confirmation.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Added => "Added to Recipe book",
            Self::Removed => "Removed from Recipe book",
        }
    }

    /// Whether the recipe is saved after the transition.
    #[must_use]
    pub const fn is_saved(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Saved recipes keyed by recipe id.
#[derive(Debug)]
pub struct SavedRecipeStore<S = FileStore> {
    backend: S,
}

impl SavedRecipeStore<FileStore> {
    /// File-backed store inside `data_dir`.
    pub fn open(data_dir: &Path) -> Result<Self> {
        Ok(Self::new(FileStore::in_dir(data_dir)?))
    }
}

impl<S: KeyValueStore> SavedRecipeStore<S> {
    /// Wrap a key-value backend.
    pub const fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Underlying backend.
    pub const fn backend(&self) -> &S {
        &self.backend
    }

    /// Whether a decodable record is stored for `id`.
    ///
    /// A corrupt record counts as not saved.
    pub fn is_saved(&self, id: &str) -> Result<bool> {
        match self.load(id) {
            Ok(record) => Ok(record.is_some()),
            Err(Error::CorruptRecord { key, reason }) => {
                warn!("treating corrupt saved record {key} as unsaved: {reason}");
                Ok(false)
            },
            Err(err) => Err(err),
        }
    }

    /// Store `record` under `id`, overwriting any previous value.
    pub fn save(&self, id: &str, record: &SavedRecipeRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        self.backend.set(&saved_key(id), &json)?;
        debug!("saved recipe {id}");
        Ok(())
    }

    /// Remove `id` if present.
    pub fn unsave(&self, id: &str) -> Result<()> {
        self.backend.remove(&saved_key(id))?;
        debug!("unsaved recipe {id}");
        Ok(())
    }

    /// Decode the record stored for `id`.
    ///
    /// A value that no longer parses is reported as [`Error::CorruptRecord`].
    pub fn load(&self, id: &str) -> Result<Option<SavedRecipeRecord>> {
        let key = saved_key(id);
        let Some(raw) = self.backend.get(&key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| Error::CorruptRecord {
                key,
                reason: e.to_string(),
            })
    }

    /// Flip the saved state of `id`.
    ///
    /// The state is re-read first. When the recipe is not saved, `fetch` is
    /// awaited for the record to store; it is never called on removal. If
    /// `fetch` fails the store is left untouched and the error is returned.
    pub async fn toggle<F, Fut>(&self, id: &str, fetch: F) -> Result<SavedState>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<SavedRecipeRecord>>,
    {
        if self.is_saved(id)? {
            self.unsave(id)?;
            return Ok(SavedState::Removed);
        }
        let record = fetch().await?;
        self.save(id, &record)?;
        Ok(SavedState::Added)
    }

    /// Snapshot of every decodable saved record, ordered by key.
    pub fn list_all(&self) -> Result<SavedSnapshot> {
        let mut keys = self.backend.keys()?;
        keys.sort();

        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(id) = key.strip_prefix(SAVED_KEY_PREFIX) else {
                continue;
            };
            match self.load(id) {
                Ok(Some(record)) => entries.push((id.to_string(), record)),
                Ok(None) => {},
                Err(Error::CorruptRecord { key, reason }) => {
                    warn!("skipping corrupt saved record {key}: {reason}");
                },
                Err(err) => return Err(err),
            }
        }
        Ok(SavedSnapshot {
            entries: entries.into_iter(),
        })
    }
}

/// Saved records captured by [`SavedRecipeStore::list_all`].
///
/// Later writes to the store do not affect a snapshot already taken.
#[derive(Debug)]
pub struct SavedSnapshot {
    entries: std::vec::IntoIter<(String, SavedRecipeRecord)>,
}

impl Iterator for SavedSnapshot {
    type Item = (String, SavedRecipeRecord);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for SavedSnapshot {}
