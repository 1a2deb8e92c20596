//! Update-and-Report service: the two operations against the single record slot.
//!
//! Every call round-trips to the store at most once; nothing is cached between
//! requests, so concurrent submissions resolve as last-write-wins inside the
//! store.

use std::sync::Arc;

use serde::Deserialize;

use ipbeacon_core::error::{BeaconError, Result};
use ipbeacon_core::report::render_report;
use ipbeacon_core::IpRecord;

use crate::clock::Clock;
use crate::store::RecordStore;

#[derive(Debug, Deserialize)]
struct UpdateReq {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    ip: Option<String>,
}

pub struct UpdateReportService {
    secret: String,
    slot_key: String,
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl UpdateReportService {
    pub fn new(
        secret: impl Into<String>,
        slot_key: impl Into<String>,
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            secret: secret.into(),
            slot_key: slot_key.into(),
            store,
            clock,
        }
    }

    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    /// Validate an update body and overwrite the slot.
    ///
    /// Body must be JSON (`MalformedRequest` otherwise). A matching `key` and
    /// a present string `ip` are required (`Unauthorized` otherwise); an empty
    /// `ip` counts as present. The store is untouched on any rejection.
    pub async fn submit(&self, body: &[u8]) -> Result<IpRecord> {
        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| BeaconError::MalformedRequest(e.to_string()))?;

        // Well-formed JSON of the wrong shape carries no usable key. Arrays are
        // refused up front since serde would map them onto the struct by position.
        let req: UpdateReq = match value {
            serde_json::Value::Object(_) => {
                serde_json::from_value(value).map_err(|_| BeaconError::Unauthorized)?
            }
            _ => return Err(BeaconError::Unauthorized),
        };

        let ip = match (req.key, req.ip) {
            (Some(key), Some(ip)) if key == self.secret => ip,
            _ => return Err(BeaconError::Unauthorized),
        };

        let record = IpRecord::new(ip, self.clock.now());
        self.store.put(&self.slot_key, record.encode()?).await?;
        Ok(record)
    }

    /// Render the current record, or `NotFound` before the first update.
    pub async fn fetch(&self) -> Result<String> {
        let raw = self
            .store
            .get(&self.slot_key)
            .await?
            .ok_or(BeaconError::NotFound)?;
        let record = IpRecord::decode(&raw)?;
        Ok(render_report(&record))
    }
}
