//! Object store seam used to fetch source images and upload annotated ones.
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("object not found: {bucket}/{key}")]
  NotFound { bucket: String, key: String },
  #[error("access denied: {bucket}/{key}")]
  AccessDenied { bucket: String, key: String },
  #[error("invalid location: {0}")]
  InvalidLocation(String),
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
  async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError>;

  /// Writes `bytes` under `key`, replacing any existing object.
  async fn store(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> Result<(), StoreError>;
}

fn check_bucket(bucket: &str) -> Result<(), StoreError> {
  if bucket.is_empty() || bucket == "." || bucket == ".." || bucket.contains(['/', '\\']) {
    return Err(StoreError::InvalidLocation(format!("bad bucket name {:?}", bucket)));
  }
  Ok(())
}

/// Buckets are directories under `root`, keys are paths relative to their bucket.
pub struct FsObjectStore {
  root: PathBuf,
}

impl FsObjectStore {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Resolves an object to a file path, refusing keys that escape the bucket.
  pub fn locate(&self, bucket: &str, key: &str) -> Result<PathBuf, StoreError> {
    check_bucket(bucket)?;
    let relative = Path::new(key);
    let is_plain = !key.is_empty() && relative.components().all(|c| matches!(c, Component::Normal(_)));
    if !is_plain {
      return Err(StoreError::InvalidLocation(format!("bad object key {:?}", key)));
    }
    Ok(self.root.join(bucket).join(relative))
  }

  fn map_io(err: std::io::Error, bucket: &str, key: &str) -> StoreError {
    match err.kind() {
      ErrorKind::NotFound => StoreError::NotFound {
        bucket: bucket.to_string(),
        key: key.to_string(),
      },
      ErrorKind::PermissionDenied => StoreError::AccessDenied {
        bucket: bucket.to_string(),
        key: key.to_string(),
      },
      _ => StoreError::Io(err),
    }
  }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
  async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
    let path = self.locate(bucket, key)?;
    tokio::fs::read(&path)
      .await
      .map_err(|e| Self::map_io(e, bucket, key))
  }

  async fn store(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
    let path = self.locate(bucket, key)?;
    if let Some(parent) = path.parent() {
      tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| Self::map_io(e, bucket, key))?;
    }
    tokio::fs::write(&path, bytes)
      .await
      .map_err(|e| Self::map_io(e, bucket, key))
  }
}

/// Keeps objects in memory.
#[derive(Default)]
pub struct MemoryObjectStore {
  objects: Mutex<HashMap<(String, String), Vec<u8>>>,
}

impl MemoryObjectStore {
  pub fn new() -> Self {
    Self::default()
  }

  fn objects(&self) -> std::sync::MutexGuard<'_, HashMap<(String, String), Vec<u8>>> {
    self.objects.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }

  pub fn insert(&self, bucket: &str, key: &str, bytes: Vec<u8>) {
    self.objects().insert((bucket.to_string(), key.to_string()), bytes);
  }

  pub fn get(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
    self.objects().get(&(bucket.to_string(), key.to_string())).cloned()
  }

  pub fn len(&self) -> usize {
    self.objects().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
  async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
    self.get(bucket, key).ok_or_else(|| StoreError::NotFound {
      bucket: bucket.to_string(),
      key: key.to_string(),
    })
  }

  async fn store(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
    check_bucket(bucket)?;
    self.insert(bucket, key, bytes);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_fs_store_round_trip_and_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsObjectStore::new(dir.path());

    store.store("out", "nested/cat.png", b"one".to_vec()).await.unwrap();
    store.store("out", "nested/cat.png", b"two".to_vec()).await.unwrap();

    assert!(dir.path().join("out/nested/cat.png").exists());
    assert_eq!(store.fetch("out", "nested/cat.png").await.unwrap(), b"two");
  }

  #[tokio::test]
  async fn test_fs_fetch_missing_object() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsObjectStore::new(dir.path());
    let err = store.fetch("in", "missing.jpg").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
  }

  #[test]
  fn test_locate_rejects_escaping_keys() {
    let store = FsObjectStore::new("/data");
    assert!(store.locate("in", "../secret").is_err());
    assert!(store.locate("in", "/etc/passwd").is_err());
    assert!(store.locate("in", "").is_err());
    assert!(store.locate("", "cat.jpg").is_err());
    assert!(store.locate("a/b", "cat.jpg").is_err());
    assert_eq!(
      store.locate("in", "photos/cat.jpg").unwrap(),
      PathBuf::from("/data/in/photos/cat.jpg")
    );
  }

  #[tokio::test]
  async fn test_memory_store() {
    let store = MemoryObjectStore::new();
    assert!(store.is_empty());
    store.store("b", "k", vec![1, 2, 3]).await.unwrap();
    assert_eq!(store.fetch("b", "k").await.unwrap(), vec![1, 2, 3]);
    assert!(matches!(
      store.fetch("b", "other").await.unwrap_err(),
      StoreError::NotFound { .. }
    ));
    assert!(matches!(
      store.store("", "k", vec![]).await.unwrap_err(),
      StoreError::InvalidLocation(_)
    ));
    assert_eq!(store.len(), 1);
  }
}
