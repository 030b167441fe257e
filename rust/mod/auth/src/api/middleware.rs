use std::sync::Arc;

use axum::http::HeaderMap;
use tracing::debug;

use clanhall_core::{bearer_token, Authenticator, ServiceError};

use crate::service::AuthGate;

/// [`Authenticator`] backed by the auth gate: requires
/// `Authorization: Bearer <token>` where the token passes
/// [`AuthGate::authorize`].
pub struct SessionAuthenticator {
    gate: Arc<AuthGate>,
}

impl SessionAuthenticator {
    pub fn new(gate: Arc<AuthGate>) -> Self {
        Self { gate }
    }
}

impl Authenticator for SessionAuthenticator {
    fn check(&self, headers: &HeaderMap, action: &str) -> Result<(), ServiceError> {
        require_session(&self.gate, headers, action)
    }
}

pub(crate) fn require_session(
    gate: &AuthGate,
    headers: &HeaderMap,
    action: &str,
) -> Result<(), ServiceError> {
    let Some(token) = bearer_token(headers) else {
        debug!("{}: no bearer token", action);
        return Err(ServiceError::Unauthorized("Unauthorized".into()));
    };
    if !gate.authorize(token) {
        debug!("{}: undecodable session token", action);
        return Err(ServiceError::Unauthorized("invalid session token".into()));
    }
    Ok(())
}
