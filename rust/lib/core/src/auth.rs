//! Authentication trait for resource routers.
//!
//! Resource modules do NOT depend on the auth module. They only know this
//! trait; the concrete implementation is injected at startup time.

use axum::http::HeaderMap;

use crate::ServiceError;

/// Pluggable authenticator. Resource routers call this for every
/// mutating endpoint.
///
/// The check receives the request headers (for extracting tokens) and a
/// `module:resource:action` string naming what is being attempted, used
/// for logging and error messages.
pub trait Authenticator: Send + Sync + 'static {
    /// Authenticate a request for the given action.
    ///
    /// Returns `Ok(())` if allowed, `Err(ServiceError::Unauthorized)` if not.
    fn check(&self, headers: &HeaderMap, action: &str) -> Result<(), ServiceError>;
}

/// A no-op authenticator that allows everything. Used for testing.
pub struct AllowAll;

impl Authenticator for AllowAll {
    fn check(&self, _headers: &HeaderMap, _action: &str) -> Result<(), ServiceError> {
        Ok(())
    }
}

/// An authenticator that denies everything. Used for testing.
pub struct DenyAll;

impl Authenticator for DenyAll {
    fn check(&self, _headers: &HeaderMap, action: &str) -> Result<(), ServiceError> {
        Err(ServiceError::Unauthorized(format!("{} denied", action)))
    }
}

/// Extract the Bearer token from the Authorization header.
/// The scheme name is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get("authorization")?.to_str().ok()?.trim_start();
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.trim()).filter(|t| !t.is_empty())
}
