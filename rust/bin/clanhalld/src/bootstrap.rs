//! Bootstrap: startup checks and storage opening.
//!
//! When clanhalld starts:
//! 1. Verify the config is usable, refusing to start otherwise.
//! 2. Open the configured KV backend.

use std::sync::Arc;

use anyhow::Context;
use clanhall_core::config::StorageConfig;
use clanhall_core::{ServerConfig, StorageBackend};
use clanhall_kv::{KVStore, KvConfig, MemoryStore, RedbStore};
use tracing::{info, warn};

/// Verify server configuration is ready to serve.
pub fn verify_config(config: &ServerConfig) -> anyhow::Result<()> {
    if config.server.listen.is_empty() {
        anyhow::bail!("server.listen is empty in configuration.");
    }
    let base = &config.server.base_path;
    if !base.is_empty() && !base.starts_with('/') {
        anyhow::bail!("server.base_path must start with '/', got {:?}", base);
    }
    if config.auth.default_username.is_empty() || config.auth.default_password.is_empty() {
        anyhow::bail!("auth.default_username and auth.default_password must not be empty.");
    }
    if config.storage.io_timeout_ms == 0 {
        anyhow::bail!("storage.io_timeout_ms must be greater than zero.");
    }
    if config.storage.backend == StorageBackend::Redb
        && config.storage.db_path.is_none()
        && config.storage.data_dir.as_os_str().is_empty()
    {
        anyhow::bail!("storage.data_dir is empty in configuration.");
    }
    Ok(())
}

/// Open the KV store selected by `storage.backend`.
pub fn open_store(storage: &StorageConfig) -> anyhow::Result<Arc<dyn KVStore>> {
    match storage.backend {
        StorageBackend::Redb => {
            let path = storage.resolve_db_path();
            let mut kv_config = KvConfig::new(path.clone());
            kv_config.cache_size = storage.cache_size;
            let store = RedbStore::open(&kv_config)
                .with_context(|| format!("failed to open KV store at {}", path.display()))?;
            info!("Opened redb store at {}", path.display());
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(verify_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn rejects_relative_base_path() {
        let mut config = ServerConfig::default();
        config.server.base_path = "api".into();
        assert!(verify_config(&config).is_err());

        config.server.base_path = "/make-server-803a1733".into();
        assert!(verify_config(&config).is_ok());
    }

    #[test]
    fn rejects_empty_admin_password() {
        let mut config = ServerConfig::default();
        config.auth.default_password = String::new();
        assert!(verify_config(&config).is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = ServerConfig::default();
        config.storage.io_timeout_ms = 0;
        assert!(verify_config(&config).is_err());
    }

    #[test]
    fn opens_redb_under_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageConfig {
            data_dir: dir.path().join("nested"),
            ..Default::default()
        };
        let kv = open_store(&storage).unwrap();
        kv.set("wipe:1", b"{}").unwrap();
        assert!(dir.path().join("nested").join("clanhall.redb").exists());
    }

    #[test]
    fn opens_memory_backend() {
        let storage = StorageConfig {
            backend: StorageBackend::Memory,
            ..Default::default()
        };
        let kv = open_store(&storage).unwrap();
        kv.set("k", b"v").unwrap();
        assert_eq!(kv.get("k").unwrap(), Some(b"v".to_vec()));
    }
}
