//! Clan site documents.
//!
//! Each struct names the fields the web front end reads. Anything else the
//! client sends is kept in `extra` and written back verbatim, so an update
//! is still a full replacement of the client's document. No field is
//! validated beyond being present with the right JSON type.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A null id reads as "no id yet", the same as an absent one.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A scheduled server wipe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Wipe {
    #[serde(deserialize_with = "null_as_empty")]
    pub id: String,
    pub server: String,
    pub date: String,
    pub time: String,
    pub notes: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A roster entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(deserialize_with = "null_as_empty")]
    pub id: String,
    pub name: String,
    pub role: String,
    pub description: String,
    pub avatar: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A linked video.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Video {
    #[serde(deserialize_with = "null_as_empty")]
    pub id: String,
    pub title: String,
    pub url: String,
    pub description: String,
    /// RFC 3339, set by the server on create and kept on update.
    pub uploaded_at: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The singleton clan profile. Absent means all fields empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClanInfo {
    pub description: String,
    pub discord: String,
    pub website: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
