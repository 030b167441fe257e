//! Clan module: the site's content collections.
//!
//! # Resources
//!
//! - **Wipe**: server wipe schedule entry (`/wipes`, key `wipe:{id}`)
//! - **TeamMember**: roster entry (`/team-members`, key `team:{id}`)
//! - **Video**: linked video (`/videos`, key `video:{id}`)
//! - **ClanInfo**: singleton profile (`/clan-info`, key `clan:info`)
//!
//! The module keeps no state of its own: every handler goes straight to the
//! KV store, and write access is decided by the injected `Authenticator`.

pub mod api;
pub mod model;
pub mod ops;
pub mod resource;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use clanhall_core::{Authenticator, Module};
use clanhall_kv::KVStore;

use crate::model::{TeamMember, Video, Wipe};
use crate::ops::{ClanInfoOps, ResourceOps};

/// Clan module implementing the Module trait.
pub struct ClanModule {
    kv: Arc<dyn KVStore>,
    auth: Arc<dyn Authenticator>,
    io_timeout: Duration,
}

impl ClanModule {
    pub fn new(kv: Arc<dyn KVStore>, auth: Arc<dyn Authenticator>, io_timeout: Duration) -> Self {
        Self {
            kv,
            auth,
            io_timeout,
        }
    }
}

impl Module for ClanModule {
    fn name(&self) -> &str {
        "clan"
    }

    fn routes(&self) -> Router {
        let kv = &self.kv;
        let auth = &self.auth;
        let timeout = self.io_timeout;

        Router::new()
            .merge(api::resource_router(
                ResourceOps::<Wipe>::new(Arc::clone(kv)),
                Arc::clone(auth),
                timeout,
            ))
            .merge(api::resource_router(
                ResourceOps::<TeamMember>::new(Arc::clone(kv)),
                Arc::clone(auth),
                timeout,
            ))
            .merge(api::resource_router(
                ResourceOps::<Video>::new(Arc::clone(kv)),
                Arc::clone(auth),
                timeout,
            ))
            .merge(api::clan_info_router(
                ClanInfoOps::new(Arc::clone(kv)),
                Arc::clone(auth),
                timeout,
            ))
    }
}
