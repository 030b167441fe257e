//! Typed JSON access on top of the byte-oriented [`KVStore`].
//!
//! The store never interprets values; these helpers are the one place where
//! documents are encoded and decoded.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::KVError;
use crate::traits::KVStore;

/// Get and decode a JSON document. Absent keys yield `Ok(None)`.
pub fn get_json<T: DeserializeOwned>(kv: &dyn KVStore, key: &str) -> Result<Option<T>, KVError> {
    match kv.get(key)? {
        Some(bytes) => serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| KVError::Serialization(format!("{}: {}", key, e))),
        None => Ok(None),
    }
}

/// Encode a document as JSON and store it, replacing any previous value.
pub fn set_json<T: Serialize + ?Sized>(kv: &dyn KVStore, key: &str, value: &T) -> Result<(), KVError> {
    let bytes =
        serde_json::to_vec(value).map_err(|e| KVError::Serialization(format!("{}: {}", key, e)))?;
    kv.set(key, &bytes)
}

/// Scan a prefix and decode every value, in key order.
pub fn scan_json<T: DeserializeOwned>(kv: &dyn KVStore, prefix: &str) -> Result<Vec<T>, KVError> {
    kv.scan(prefix)?
        .into_iter()
        .map(|(key, bytes)| {
            serde_json::from_slice(&bytes)
                .map_err(|e| KVError::Serialization(format!("{}: {}", key, e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        id: String,
        n: u32,
    }

    #[test]
    fn typed_round_trip_and_scan() {
        let kv = MemoryStore::new();
        set_json(&kv, "doc:1", &Doc { id: "1".into(), n: 1 }).unwrap();
        set_json(&kv, "doc:2", &Doc { id: "2".into(), n: 2 }).unwrap();

        let one: Option<Doc> = get_json(&kv, "doc:1").unwrap();
        assert_eq!(one, Some(Doc { id: "1".into(), n: 1 }));

        let all: Vec<Doc> = scan_json(&kv, "doc:").unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].n, 2);
    }

    #[test]
    fn garbage_bytes_are_a_serialization_error() {
        let kv = MemoryStore::new();
        kv.set("doc:bad", b"not json").unwrap();
        let err = get_json::<Doc>(&kv, "doc:bad").unwrap_err();
        assert!(matches!(err, KVError::Serialization(_)));
        assert!(err.to_string().contains("doc:bad"));
    }
}
