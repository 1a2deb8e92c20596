//! Shared application state for the ipbeacon server.
//!
//! Holds no record data: the service is stateless per request and the store
//! handle is the only shared resource.

use std::sync::Arc;

use ipbeacon_core::error::Result;

use crate::clock::{Clock, SystemClock};
use crate::config::{Settings, StoreBackend};
use crate::service::UpdateReportService;
use crate::store::{FileStore, MemoryStore, RecordStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    service: UpdateReportService,
    max_body_bytes: usize,
}

impl AppState {
    pub fn new(service: UpdateReportService, max_body_bytes: usize) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                service,
                max_body_bytes,
            }),
        }
    }

    /// Build state from validated settings: resolve the secret from the
    /// environment, open the configured store, use the system clock.
    /// Returns Result so main can report startup errors without panicking.
    pub async fn from_settings(cfg: &Settings) -> Result<Self> {
        let secret = cfg.resolve_secret()?;
        let store = open_store(cfg).await?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let service = UpdateReportService::new(secret, cfg.store.key.clone(), store, clock);
        Ok(Self::new(service, cfg.server.max_body_bytes))
    }

    pub fn service(&self) -> &UpdateReportService {
        &self.inner.service
    }

    pub fn max_body_bytes(&self) -> usize {
        self.inner.max_body_bytes
    }
}

async fn open_store(cfg: &Settings) -> Result<Arc<dyn RecordStore>> {
    match (cfg.store.backend, &cfg.store.dir) {
        (StoreBackend::File, Some(dir)) => {
            let store = FileStore::open(dir).await?;
            tracing::info!(dir = %store.dir().display(), key = %cfg.store.key, "using file store");
            Ok(Arc::new(store))
        }
        (StoreBackend::File, None) => Err(ipbeacon_core::BeaconError::Config(
            "store.dir is required when store.backend is file".into(),
        )),
        (StoreBackend::Memory, _) => {
            tracing::warn!("using in-memory store; the record is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
