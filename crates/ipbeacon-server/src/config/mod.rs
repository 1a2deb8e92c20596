//! Server config loader (strict parsing).

pub mod schema;

use std::{fs, io, path::Path};

use ipbeacon_core::error::{BeaconError, Result};

pub use schema::{AuthSection, ServerSection, Settings, StoreBackend, StoreSection};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)
        .map_err(|e| BeaconError::Config(format!("read {} failed: {e}", path.display())))?;
    load_from_str(&s)
}

/// Like [`load_from_file`], but a missing file yields the defaults.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(s) => load_from_str(&s),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            let cfg = Settings::default();
            cfg.validate()?;
            Ok(cfg)
        }
        Err(e) => Err(BeaconError::Config(format!(
            "read {} failed: {e}",
            path.display()
        ))),
    }
}

pub fn load_from_str(s: &str) -> Result<Settings> {
    let cfg: Settings = serde_yaml::from_str(s)
        .map_err(|e| BeaconError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
