//! Resource trait + impls for the clan collections.

use serde::de::DeserializeOwned;
use serde::Serialize;

use clanhall_core::now_rfc3339;

use crate::model::{TeamMember, Video, Wipe};

/// Trait implemented by documents stored as a keyed collection.
///
/// Hooks have default no-op impls.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// KV key prefix, e.g. `"wipe:"`. The record key is prefix + id.
    const PREFIX: &'static str;

    /// URL segment, e.g. `"wipes"`.
    const PATH: &'static str;

    /// Singular name for logs and action strings.
    const NAME: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Called before a new record is first written.
    fn before_create(&mut self) {}

    /// Called before an update is written, with the record it replaces.
    fn before_update(&mut self, _existing: Option<&Self>) {}
}

impl Resource for Wipe {
    const PREFIX: &'static str = "wipe:";
    const PATH: &'static str = "wipes";
    const NAME: &'static str = "wipe";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Resource for TeamMember {
    const PREFIX: &'static str = "team:";
    const PATH: &'static str = "team-members";
    const NAME: &'static str = "team member";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Resource for Video {
    const PREFIX: &'static str = "video:";
    const PATH: &'static str = "videos";
    const NAME: &'static str = "video";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn before_create(&mut self) {
        self.uploaded_at = now_rfc3339();
    }

    // The upload time belongs to the stored record, not the client.
    fn before_update(&mut self, existing: Option<&Self>) {
        self.uploaded_at = match existing {
            Some(prev) if !prev.uploaded_at.is_empty() => prev.uploaded_at.clone(),
            _ => now_rfc3339(),
        };
    }
}
