//! Keyed entity store backing the mock services.
//!
//! The in-memory map is authoritative. When a data directory is
//! configured, every mutation rewrites `<dir>/internal_mode_<ns>.json`
//! and the map is hydrated from it once at construction. Storage
//! failures are logged and otherwise invisible to callers: the mock
//! backend keeps working memory-only.
//!
//! The durable file is last-writer-wins between processes; nothing
//! coordinates concurrent writers. That is acceptable for a demo
//! backend and is a documented limitation, not a bug.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;

use clickdelivery_core::ApiResult;

/// Namespace prefix shared by every mock collection and honoured by
/// [`clear_all_stores`].
pub const STORAGE_PREFIX: &str = "internal_mode_";

/// Generic keyed store over one mock entity collection.
pub struct Store<T> {
    map: RwLock<BTreeMap<String, T>>,
    file: Option<PathBuf>,
}

impl<T> Store<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    /// Creates a store for `namespace`, hydrating from `dir` when given.
    pub fn new(namespace: &str, dir: Option<&Path>) -> Self {
        let file = dir.map(|dir| dir.join(format!("{STORAGE_PREFIX}{namespace}.json")));
        let map = file
            .as_deref()
            .and_then(|file| match std::fs::read_to_string(file) {
                Ok(data) => match serde_json::from_str(&data) {
                    Ok(map) => Some(map),
                    Err(err) => {
                        tracing::warn!(?file, %err, "ignoring corrupt store file");
                        None
                    }
                },
                Err(_) => None,
            })
            .unwrap_or_default();
        Self {
            map: RwLock::new(map),
            file,
        }
    }

    // A panicking mutator poisons the lock; the map itself is still
    // consistent (try_update mutates a clone), so recover the guard.
    fn read_map(&self) -> RwLockReadGuard<'_, BTreeMap<String, T>> {
        self.map.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_map(&self) -> RwLockWriteGuard<'_, BTreeMap<String, T>> {
        self.map.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, map: &BTreeMap<String, T>) {
        let Some(file) = &self.file else { return };
        let data = match serde_json::to_string(map) {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(?file, %err, "could not serialize store");
                return;
            }
        };
        if let Err(err) = std::fs::write(file, data) {
            tracing::warn!(?file, %err, "could not persist store");
        }
    }

    pub fn set(&self, id: &str, value: T) {
        let mut map = self.write_map();
        map.insert(id.to_string(), value);
        self.persist(&map);
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.read_map().get(id).cloned()
    }

    pub fn get_all(&self) -> Vec<T> {
        self.read_map().values().cloned().collect()
    }

    /// Read-modify-write. Returns the updated value, or `None` when the
    /// key does not exist; absent keys are never created implicitly.
    pub fn update<F>(&self, id: &str, mutate: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut map = self.write_map();
        let value = map.get_mut(id)?;
        mutate(value);
        let updated = value.clone();
        self.persist(&map);
        Some(updated)
    }

    /// Like [`Store::update`], but the mutator may veto the write.
    /// Nothing is persisted and the entry is untouched when it does.
    pub fn try_update<F>(&self, id: &str, mutate: F) -> ApiResult<Option<T>>
    where
        F: FnOnce(&mut T) -> ApiResult<()>,
    {
        let mut map = self.write_map();
        let Some(current) = map.get(id) else {
            return Ok(None);
        };
        let mut candidate = current.clone();
        mutate(&mut candidate)?;
        map.insert(id.to_string(), candidate.clone());
        self.persist(&map);
        Ok(Some(candidate))
    }

    pub fn delete(&self, id: &str) -> bool {
        let mut map = self.write_map();
        let removed = map.remove(id).is_some();
        self.persist(&map);
        removed
    }

    pub fn clear(&self) {
        let mut map = self.write_map();
        map.clear();
        self.persist(&map);
    }

    pub fn has(&self, id: &str) -> bool {
        self.read_map().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.read_map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Purges every persisted mock collection under `dir`. Idempotent;
/// failures are logged and skipped.
pub fn clear_all_stores(dir: &Path) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };
    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.starts_with(STORAGE_PREFIX) {
            if let Err(err) = std::fs::remove_file(entry.path()) {
                tracing::warn!(file = name, %err, "could not remove store file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clickdelivery_core::ApiError;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
        count: u32,
    }

    fn item(id: &str, count: u32) -> Item {
        Item {
            id: id.to_string(),
            count,
        }
    }

    #[test]
    fn set_get_roundtrip() {
        let store: Store<Item> = Store::new("items", None);
        store.set("a", item("a", 1));
        assert_eq!(store.get("a"), Some(item("a", 1)));
        assert_eq!(store.len(), 1);
        assert!(store.has("a"));
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn update_is_read_modify_write_without_implicit_creation() {
        let store: Store<Item> = Store::new("items", None);
        store.set("a", item("a", 1));

        let updated = store.update("a", |i| i.count += 1);
        assert_eq!(updated, Some(item("a", 2)));

        assert!(store.update("missing", |i| i.count += 1).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn vetoed_update_leaves_entry_untouched() {
        let store: Store<Item> = Store::new("items", None);
        store.set("a", item("a", 1));

        let result = store.try_update("a", |i| {
            i.count = 99;
            Err(ApiError::invalid_status("no"))
        });
        assert!(result.is_err());
        assert_eq!(store.get("a"), Some(item("a", 1)));
    }

    #[test]
    fn panicking_mutator_does_not_wedge_the_store() {
        let store: Store<Item> = Store::new("items", None);
        store.set("a", item("a", 1));

        let store_ref = &store;
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            store_ref.try_update("a", |_| panic!("mutator blew up"))
        }));
        assert!(result.is_err());

        // The lock recovers from poisoning and the entry is intact.
        assert_eq!(store.get("a"), Some(item("a", 1)));
        store.update("a", |i| i.count += 1);
        assert_eq!(store.get("a"), Some(item("a", 2)));
    }

    #[test]
    fn hydrates_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store: Store<Item> = Store::new("items", Some(dir.path()));
            store.set("a", item("a", 7));
        }
        let reloaded: Store<Item> = Store::new("items", Some(dir.path()));
        assert_eq!(reloaded.get("a"), Some(item("a", 7)));
    }

    #[test]
    fn unwritable_dir_degrades_silently() {
        let store: Store<Item> = Store::new("items", Some(Path::new("/nonexistent/nowhere")));
        store.set("a", item("a", 1));
        assert_eq!(store.get("a"), Some(item("a", 1)));
    }

    #[test]
    fn clear_all_stores_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store: Store<Item> = Store::new("items", Some(dir.path()));
        store.set("a", item("a", 1));

        clear_all_stores(dir.path());
        clear_all_stores(dir.path());

        let reloaded: Store<Item> = Store::new("items", Some(dir.path()));
        assert!(reloaded.is_empty());
    }
}
