use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use ipbeacon_core::error::{BeaconError, Result};

use super::{is_valid_key, RecordStore};

/// Durable store: one file per key under `dir`.
///
/// `put` writes and fsyncs a sibling temp file, then renames it over the
/// target, so a reader sees either the previous value or the new one, never a
/// torn or empty write.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    seq: AtomicU64,
}

impl FileStore {
    /// Open (and create if needed) the backing directory.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| store_err("create dir", &dir, e))?;
        Ok(Self {
            dir,
            seq: AtomicU64::new(0),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if !is_valid_key(key) {
            return Err(BeaconError::Store(format!("invalid key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl RecordStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        let path = self.path_for(key)?;
        match fs::read(&path).await {
            Ok(raw) => Ok(Some(Bytes::from(raw))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(store_err("read", &path, e)),
        }
    }

    async fn put(&self, key: &str, value: Bytes) -> Result<()> {
        let path = self.path_for(key)?;
        let n = self.seq.fetch_add(1, Ordering::Relaxed);
        let tmp = self
            .dir
            .join(format!(".{key}.{}.{n}.tmp", std::process::id()));

        if let Err(e) = write_synced(&tmp, &value).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(store_err("write", &tmp, e));
        }
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(store_err("rename", &path, e));
        }
        Ok(())
    }
}

/// Data must be on disk before the rename publishes it, else a crash can
/// leave the slot as an empty file.
async fn write_synced(path: &Path, value: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(value).await?;
    file.sync_all().await
}

fn store_err(op: &str, path: &Path, e: io::Error) -> BeaconError {
    tracing::debug!(op, path = %path.display(), error = %e, "file store io failed");
    BeaconError::Store(format!("{op} {} failed: {e}", path.display()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(tmp.path()).await.unwrap();
        assert!(store.get("latest").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_then_get_survives_reopen() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested");
        {
            let store = FileStore::open(&dir).await.unwrap();
            store.put("latest", Bytes::from_static(b"one")).await.unwrap();
            store.put("latest", Bytes::from_static(b"two")).await.unwrap();
        }
        let store = FileStore::open(&dir).await.unwrap();
        assert_eq!(store.get("latest").await.unwrap().unwrap(), "two");

        // no temp files left behind
        let mut entries = std::fs::read_dir(&dir).unwrap();
        let only = entries.next().unwrap().unwrap();
        assert_eq!(only.file_name(), "latest.json");
        assert!(entries.next().is_none());
    }

    #[tokio::test]
    async fn synced_write_lands_complete() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(tmp.path()).await.unwrap();
        let value = Bytes::from_static(br#"{"ip":"203.0.113.9","ts":"2024-01-01T12:00:00.000Z"}"#);
        store.put("latest", value.clone()).await.unwrap();

        let on_disk = std::fs::read(tmp.path().join("latest.json")).unwrap();
        assert_eq!(on_disk, value.as_ref());
    }

    #[tokio::test]
    async fn failed_write_surfaces_store_error() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("slot");
        let store = FileStore::open(&dir).await.unwrap();
        store.put("latest", Bytes::from_static(b"old")).await.unwrap();

        std::fs::remove_dir_all(&dir).unwrap();
        let err = store.put("latest", Bytes::from_static(b"new")).await.unwrap_err();
        assert!(matches!(err, BeaconError::Store(_)));
        assert!(store.get("latest").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn path_like_keys_are_refused() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(tmp.path()).await.unwrap();
        let err = store
            .put("../escape", Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert!(matches!(err, BeaconError::Store(_)));
    }
}
