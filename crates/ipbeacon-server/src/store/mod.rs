//! Record store seam.
//!
//! The service sees a plain key/value interface with single-call `get` and
//! `put`; whichever write reaches the backend last wins. Both built-in
//! backends are read-after-write consistent for a key.

mod file;
mod memory;

use async_trait::async_trait;
use bytes::Bytes;

use ipbeacon_core::error::Result;

pub use file::FileStore;
pub use memory::MemoryStore;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// `Ok(None)` when nothing was ever stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;

    /// Replace the value under `key` unconditionally.
    async fn put(&self, key: &str, value: Bytes) -> Result<()>;
}

/// Keys double as file names for [`FileStore`], so they stay in `[A-Za-z0-9_-]+`.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
