use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tracing::warn;

use clanhall_core::{run_blocking, JsonBody, ServiceError};

use crate::api::middleware::require_session;
use crate::api::AuthState;
use crate::model::ChangePasswordRequest;

pub fn routes() -> Router<AuthState> {
    Router::new().route("/change-password", post(change_password))
}

/// POST /change-password (session token required)
///
/// `{currentPassword, newPassword, newUsername?}` → `{success: true}`.
async fn change_password(
    State(state): State<AuthState>,
    headers: HeaderMap,
    JsonBody(body): JsonBody<ChangePasswordRequest>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    require_session(&state.gate, &headers, "auth:credentials:update")?;

    let gate = state.gate.clone();
    run_blocking(state.io_timeout, move || {
        gate.rotate_credentials(
            &body.current_password,
            body.new_username.as_deref(),
            &body.new_password,
        )
        .map_err(ServiceError::from)
    })
    .await
    .inspect_err(|e| warn!("Change password error: {}", e))?;

    Ok(Json(json!({ "success": true })))
}
