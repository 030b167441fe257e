use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tracing::warn;

use clanhall_core::{run_blocking, JsonBody, ServiceError};

use crate::api::AuthState;
use crate::model::{LoginRequest, LoginResponse, VerifyRequest};

pub fn routes() -> Router<AuthState> {
    Router::new()
        .route("/login", post(login))
        .route("/verify-token", post(verify_token))
}

/// POST /login
///
/// `{username, password}` → `{success, token, username}`, or 401 on mismatch.
async fn login(
    State(state): State<AuthState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ServiceError> {
    let gate = state.gate.clone();
    let result = run_blocking(state.io_timeout, move || {
        gate.login(&body.username, &body.password)
            .map_err(ServiceError::from)
    })
    .await;

    match result {
        Ok(success) => Ok(Json(success.into())),
        Err(e) => {
            warn!("Login error: {}", e);
            Err(e)
        }
    }
}

/// POST /verify-token
///
/// `{token}` → `{valid: true}`, or 401 `{valid: false}`.
async fn verify_token(
    State(state): State<AuthState>,
    JsonBody(body): JsonBody<VerifyRequest>,
) -> Response {
    let valid = body
        .token
        .as_deref()
        .is_some_and(|token| state.gate.authorize(token));

    let status = if valid { StatusCode::OK } else { StatusCode::UNAUTHORIZED };
    (status, Json(json!({ "valid": valid }))).into_response()
}
