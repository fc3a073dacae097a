use crate::domain::ports::StorageBackend;
use crate::utils::error::{AuthError, Result};
use fs4::fs_std::FileExt;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tempfile::NamedTempFile;

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| AuthError::storage("storage lock poisoned"))
}

/// 記憶體存儲 (測試與無狀態執行使用)
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.items)?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.items)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        lock(&self.items)?.remove(key);
        Ok(())
    }
}

/// JSON 檔案存儲: 整個檔案是一個 `{key: value}` 物件
///
/// 每次呼叫都持有旁邊 `<file>.lock` 的 OS 建議鎖 (讀取共享, 寫入獨占),
/// 多個實例或多個程序操作同一個檔案時 load → modify → persist 不會交錯.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    /// 鎖在回傳的 `File` 被 drop 時釋放
    fn acquire_lock(&self, exclusive: bool) -> Result<File> {
        fs::create_dir_all(self.parent_dir())?;
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path())?;

        if exclusive {
            FileExt::lock_exclusive(&lock_file)?;
        } else {
            FileExt::lock_shared(&lock_file)?;
        }
        Ok(lock_file)
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(AuthError::IoError(e)),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            AuthError::storage(format!(
                "Corrupted storage file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> Result<()> {
        // 同目錄下的唯一暫存檔, rename 後才可見
        let mut tmp = NamedTempFile::new_in(self.parent_dir())?;
        tmp.write_all(&serde_json::to_vec_pretty(items)?)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| AuthError::IoError(e.error))?;

        tracing::debug!(
            "💾 Storage file updated: {} ({} keys)",
            self.path.display(),
            items.len()
        );
        Ok(())
    }

    fn update<F>(&self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let _lock = self.acquire_lock(true)?;
        let mut items = self.load()?;
        if mutate(&mut items) {
            self.persist(&items)?;
        }
        Ok(())
    }
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let _lock = self.acquire_lock(false)?;
        Ok(self.load()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.update(|items| {
            items.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.update(|items| items.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("token").unwrap(), None);

        storage.set_item("token", "abc").unwrap();
        assert_eq!(storage.get_item("token").unwrap().as_deref(), Some("abc"));
        assert_eq!(storage.len(), 1);

        storage.remove_item("token").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_memory_storage_clones_share_state() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        handle.set_item("user", "{}").unwrap();
        assert_eq!(storage.get_item("user").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_file_storage_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("local_storage.json");

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get_item("token").unwrap(), None);
        storage.set_item("token", "t1").unwrap();
        storage.set_item("user", r#"{"id":1}"#).unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get_item("token").unwrap().as_deref(), Some("t1"));
        assert_eq!(
            reopened.get_item("user").unwrap().as_deref(),
            Some(r#"{"id":1}"#)
        );

        reopened.remove_item("token").unwrap();
        assert_eq!(storage.get_item("token").unwrap(), None);
    }

    #[test]
    fn test_file_storage_concurrent_writers_keep_all_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("local_storage.json");

        for round in 0..50 {
            let first = FileStorage::new(&path);
            let second = FileStorage::new(&path);
            let key_a = format!("a{}", round);
            let key_b = format!("b{}", round);

            std::thread::scope(|scope| {
                let writer_a = scope.spawn(|| first.set_item(&key_a, "1"));
                let writer_b = scope.spawn(|| second.set_item(&key_b, "2"));
                writer_a.join().unwrap().unwrap();
                writer_b.join().unwrap().unwrap();
            });

            let reader = FileStorage::new(&path);
            assert_eq!(reader.get_item(&key_a).unwrap().as_deref(), Some("1"));
            assert_eq!(reader.get_item(&key_b).unwrap().as_deref(), Some("2"));
        }

        let leftovers: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .filter(|name| name != "local_storage.json" && name != "local_storage.json.lock")
            .collect();
        assert!(leftovers.is_empty(), "unexpected files: {:?}", leftovers);
    }

    #[test]
    fn test_file_storage_remove_missing_key_does_not_create_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("local_storage.json");

        let storage = FileStorage::new(&path);
        storage.remove_item("token").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_file_storage_corrupted_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("local_storage.json");
        std::fs::write(&path, "not json").unwrap();

        let storage = FileStorage::new(&path);
        let err = storage.get_item("token").unwrap_err();
        assert!(matches!(err, AuthError::StorageError { .. }));
    }
}
