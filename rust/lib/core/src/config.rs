//! Server configuration, read from a TOML file.
//!
//! ```toml
//! [server]
//! listen = "0.0.0.0:8080"
//! base_path = "/make-server-803a1733"
//!
//! [storage]
//! backend = "redb"
//! data_dir = "/var/lib/clanhall"
//! io_timeout_ms = 5000
//!
//! [auth]
//! default_username = "admin"
//! default_password = "admin123"
//! ```
//!
//! Every field has a default, so an empty (or missing) file is a valid
//! configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: HttpConfig,
    pub storage: StorageConfig,
    pub auth: AuthSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Listen address for the HTTP server.
    pub listen: String,

    /// Path prefix every API route is mounted under. Empty mounts at `/`.
    pub base_path: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".to_string(),
            base_path: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Durable redb file.
    #[default]
    Redb,
    /// In-process map; everything is lost on restart.
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Directory holding the database file.
    pub data_dir: PathBuf,

    /// Path to the redb database file.
    /// Defaults to `{data_dir}/clanhall.redb` if not specified.
    pub db_path: Option<PathBuf>,

    /// redb page cache size in bytes.
    pub cache_size: Option<usize>,

    /// Upper bound for a single storage operation, in milliseconds.
    pub io_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Redb,
            data_dir: PathBuf::from("data"),
            db_path: None,
            cache_size: None,
            io_timeout_ms: 5000,
        }
    }
}

impl StorageConfig {
    /// Resolve the redb database path, falling back to `{data_dir}/clanhall.redb`.
    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("clanhall.redb"))
    }

    pub fn io_timeout(&self) -> Duration {
        Duration::from_millis(self.io_timeout_ms)
    }
}

/// Administrator identity written on first start when no credential
/// record exists yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSection {
    pub default_username: String,
    pub default_password: String,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            default_username: "admin".to_string(),
            default_password: "admin123".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load config from disk, or return the defaults if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
