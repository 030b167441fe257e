//! Auth module: single administrator login and session-token gate.
//!
//! # Pieces
//!
//! - **Credential record**: `admin:credentials` in the KV store, created on
//!   first start by [`AuthGate::bootstrap`]
//! - **Login**: username + SHA-256 password check, mints a session token
//! - **Authorize**: structural token check used by every protected route
//!
//! # Usage
//!
//! ```ignore
//! use clanhall_auth::{AuthConfig, AuthModule};
//!
//! let module = AuthModule::new(kv, &AuthConfig::default(), io_timeout)?;
//! let authenticator = module.authenticator();
//! let router = module.routes();
//! ```

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use clanhall_core::{Authenticator, Module};
use clanhall_kv::KVStore;

pub use api::SessionAuthenticator;
pub use service::{AuthConfig, AuthError, AuthGate};

/// Auth module implementing the Module trait.
pub struct AuthModule {
    gate: Arc<AuthGate>,
    io_timeout: Duration,
}

impl AuthModule {
    /// Bootstrap the credential record and create the module.
    pub fn new(
        kv: Arc<dyn KVStore>,
        config: &AuthConfig,
        io_timeout: Duration,
    ) -> Result<Self, AuthError> {
        let gate = AuthGate::bootstrap(kv, config)?;
        Ok(Self { gate, io_timeout })
    }

    pub fn gate(&self) -> &Arc<AuthGate> {
        &self.gate
    }

    /// Authenticator for other modules' protected routes.
    pub fn authenticator(&self) -> Arc<dyn Authenticator> {
        Arc::new(SessionAuthenticator::new(Arc::clone(&self.gate)))
    }
}

impl Module for AuthModule {
    fn name(&self) -> &str {
        "auth"
    }

    fn routes(&self) -> Router {
        api::build_router(Arc::clone(&self.gate), self.io_timeout)
    }
}
