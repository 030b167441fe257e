use std::path::PathBuf;
use std::sync::Arc;

use redb::{Builder, Database, ReadableTable, TableDefinition};
use tracing::debug;

use crate::error::KVError;
use crate::traits::KVStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

/// Connection parameters for [`RedbStore`]. Built by the caller from its own
/// configuration; the store never reads the environment.
#[derive(Debug, Clone)]
pub struct KvConfig {
    /// Path of the redb database file. Parent directories are created.
    pub path: PathBuf,

    /// Page cache size in bytes. `None` keeps the redb default.
    pub cache_size: Option<usize>,
}

impl KvConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache_size: None,
        }
    }
}

/// RedbStore is a KVStore implementation backed by redb, a pure-Rust embedded
/// ACID key-value database. Every `set`/`delete` is its own write transaction
/// and every `scan` reads from one snapshot.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a redb database as described by `config`.
    pub fn open(config: &KvConfig) -> Result<Self, KVError> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(KVError::unavailable)?;
            }
        }

        let mut builder = Builder::new();
        if let Some(bytes) = config.cache_size {
            builder.set_cache_size(bytes);
        }
        let db = builder.create(&config.path).map_err(KVError::unavailable)?;

        // Ensure the table exists by doing a write transaction.
        let write_txn = db.begin_write().map_err(KVError::unavailable)?;
        {
            let _table = write_txn.open_table(TABLE).map_err(KVError::unavailable)?;
        }
        write_txn.commit().map_err(KVError::unavailable)?;

        debug!("RedbStore: opened {:?}", config.path);
        Ok(Self { db: Arc::new(db) })
    }
}

impl KVStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let read_txn = self.db.begin_read().map_err(KVError::unavailable)?;
        let table = read_txn.open_table(TABLE).map_err(KVError::unavailable)?;

        match table.get(key) {
            Ok(Some(val)) => Ok(Some(val.value().to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(KVError::unavailable(e)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        self.batch_set(&[(key, value)])
    }

    fn delete(&self, key: &str) -> Result<(), KVError> {
        self.batch_delete(&[key])
    }

    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(KVError::unavailable)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(KVError::unavailable)?;
            for (key, value) in entries {
                table.insert(*key, *value).map_err(KVError::unavailable)?;
            }
        }
        write_txn.commit().map_err(KVError::unavailable)?;
        Ok(())
    }

    fn batch_delete(&self, keys: &[&str]) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(KVError::unavailable)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(KVError::unavailable)?;
            for key in keys {
                table.remove(*key).map_err(KVError::unavailable)?;
            }
        }
        write_txn.commit().map_err(KVError::unavailable)?;
        Ok(())
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
        let read_txn = self.db.begin_read().map_err(KVError::unavailable)?;
        let table = read_txn.open_table(TABLE).map_err(KVError::unavailable)?;

        let mut results = Vec::new();
        let iter = table.range(prefix..).map_err(KVError::unavailable)?;

        for entry in iter {
            let (key, value) = entry.map_err(KVError::unavailable)?;
            let key = key.value();
            if !key.starts_with(prefix) {
                break;
            }
            results.push((key.to_string(), value.value().to_vec()));
        }

        Ok(results)
    }
}
