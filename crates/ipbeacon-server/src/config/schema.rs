use std::path::PathBuf;

use serde::Deserialize;
use ipbeacon_core::error::{BeaconError, Result};
use ipbeacon_core::SLOT_KEY;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub auth: AuthSection,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            store: StoreSection::default(),
            auth: AuthSection::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(BeaconError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.store.validate()?;
        self.auth.validate()?;

        Ok(())
    }

    /// Read the shared secret from the environment variable named by `auth.secret_env`.
    pub fn resolve_secret(&self) -> Result<String> {
        self.auth.resolve_with(|name| std::env::var(name).ok())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.parse::<std::net::SocketAddr>().is_err() {
            return Err(BeaconError::Config(format!(
                "server.listen must be a valid socket address, got {:?}",
                self.listen
            )));
        }
        if !(64..=1_048_576).contains(&self.max_body_bytes) {
            return Err(BeaconError::Config(
                "server.max_body_bytes must be between 64 and 1048576".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_max_body_bytes() -> usize {
    4096
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Directory holding one file per key. Required for `backend: file`.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default = "default_slot_key")]
    pub key: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            dir: None,
            key: default_slot_key(),
        }
    }
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if !crate::store::is_valid_key(&self.key) {
            return Err(BeaconError::Config(format!(
                "store.key must match [A-Za-z0-9_-]+, got {:?}",
                self.key
            )));
        }
        if self.backend == StoreBackend::File && self.dir.is_none() {
            return Err(BeaconError::Config(
                "store.dir is required when store.backend is file".into(),
            ));
        }
        Ok(())
    }
}

fn default_slot_key() -> String {
    SLOT_KEY.into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthSection {
    #[serde(default = "default_secret_env")]
    pub secret_env: String,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            secret_env: default_secret_env(),
        }
    }
}

impl AuthSection {
    pub fn validate(&self) -> Result<()> {
        if self.secret_env.trim().is_empty() {
            return Err(BeaconError::Config("auth.secret_env must not be empty".into()));
        }
        Ok(())
    }

    pub(crate) fn resolve_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
        match lookup(&self.secret_env) {
            Some(secret) if !secret.is_empty() => Ok(secret),
            Some(_) => Err(BeaconError::Config(format!(
                "environment variable {} is empty",
                self.secret_env
            ))),
            None => Err(BeaconError::Config(format!(
                "environment variable {} is not set",
                self.secret_env
            ))),
        }
    }
}

fn default_secret_env() -> String {
    "UPDATE_SECRET".into()
}
