//! CRUD operations over the KV store.
//!
//! `ResourceOps<T>` maps a [`Resource`] collection onto keys `T::PREFIX + id`;
//! `ClanInfoOps` handles the singleton `clan:info` document. Both only call
//! `get`/`set`/`delete`/`scan`.

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use clanhall_core::{new_id, ServiceError};
use clanhall_kv::{get_json, scan_json, set_json, KVError, KVStore};

use crate::model::ClanInfo;
use crate::resource::Resource;

/// KV key of the clan profile.
pub const CLAN_INFO_KEY: &str = "clan:info";

pub(crate) fn kv_err(e: KVError) -> ServiceError {
    match e {
        KVError::Unavailable(m) => ServiceError::StorageUnavailable(m),
        KVError::Serialization(m) => ServiceError::Internal(format!("stored document: {}", m)),
    }
}

/// CRUD operations for one collection. Holds a reference to the KV backend.
pub struct ResourceOps<T: Resource> {
    kv: Arc<dyn KVStore>,
    _phantom: PhantomData<T>,
}

impl<T: Resource> Clone for ResourceOps<T> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.kv))
    }
}

impl<T: Resource> ResourceOps<T> {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            kv,
            _phantom: PhantomData,
        }
    }

    fn make_key(id: &str) -> String {
        format!("{}{}", T::PREFIX, id)
    }

    /// Get a record by id. Returns None if not found.
    pub fn get(&self, id: &str) -> Result<Option<T>, ServiceError> {
        get_json(self.kv.as_ref(), &Self::make_key(id)).map_err(kv_err)
    }

    /// All records in the collection, in key order. Callers sort as they like.
    pub fn list(&self) -> Result<Vec<T>, ServiceError> {
        scan_json(self.kv.as_ref(), T::PREFIX).map_err(kv_err)
    }

    /// Store a new record, assigning an id when none was supplied.
    /// Returns the id. A supplied id that already exists is overwritten.
    pub fn create(&self, mut record: T) -> Result<String, ServiceError> {
        if record.id().is_empty() {
            record.set_id(new_id());
        }
        record.before_create();

        let id = record.id().to_string();
        set_json(self.kv.as_ref(), &Self::make_key(&id), &record).map_err(kv_err)?;
        debug!("created {} {}", T::NAME, id);
        Ok(id)
    }

    /// Replace the record at `id` with `record`. The id from the caller wins
    /// over any id in the body. Missing records are created.
    pub fn update(&self, id: &str, mut record: T) -> Result<(), ServiceError> {
        if id.is_empty() {
            return Err(ServiceError::BadRequest(format!("{} id must not be empty", T::NAME)));
        }
        record.set_id(id.to_string());

        let existing = self.get(id)?;
        record.before_update(existing.as_ref());

        set_json(self.kv.as_ref(), &Self::make_key(id), &record).map_err(kv_err)?;
        debug!("updated {} {}", T::NAME, id);
        Ok(())
    }

    /// Delete a record by id. Deleting an absent record is not an error.
    pub fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.kv.delete(&Self::make_key(id)).map_err(kv_err)?;
        debug!("deleted {} {}", T::NAME, id);
        Ok(())
    }
}

/// Get/replace for the singleton clan profile.
#[derive(Clone)]
pub struct ClanInfoOps {
    kv: Arc<dyn KVStore>,
}

impl ClanInfoOps {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self { kv }
    }

    /// The stored profile, or the empty default when none was saved.
    pub fn get(&self) -> Result<ClanInfo, ServiceError> {
        Ok(get_json(self.kv.as_ref(), CLAN_INFO_KEY)
            .map_err(kv_err)?
            .unwrap_or_default())
    }

    pub fn replace(&self, info: &ClanInfo) -> Result<(), ServiceError> {
        set_json(self.kv.as_ref(), CLAN_INFO_KEY, info).map_err(kv_err)
    }
}
