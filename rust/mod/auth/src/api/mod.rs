mod login;
mod middleware;
mod password;

pub use middleware::SessionAuthenticator;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use crate::service::AuthGate;

/// Shared state for auth handlers.
#[derive(Clone)]
pub struct AuthState {
    pub gate: Arc<AuthGate>,
    /// Upper bound for each credential read/write.
    pub io_timeout: Duration,
}

/// Build the auth API router.
///
/// All routes are relative; the server mounts them at its base path.
pub fn build_router(gate: Arc<AuthGate>, io_timeout: Duration) -> Router {
    Router::new()
        .merge(login::routes())
        .merge(password::routes())
        .with_state(AuthState { gate, io_timeout })
}
