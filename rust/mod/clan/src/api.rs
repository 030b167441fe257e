//! Router builders for the clan resources.
//!
//! Reads are public. Writes go through the injected `Authenticator`, with
//! actions named `clan:{resource}:{verb}`.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::warn;

use clanhall_core::{run_blocking, Authenticator, JsonBody, ServiceError};

use crate::model::ClanInfo;
use crate::ops::{ClanInfoOps, ResourceOps};
use crate::resource::Resource;

/// Shared state for collection route handlers.
struct ResourceState<T: Resource> {
    ops: ResourceOps<T>,
    auth: Arc<dyn Authenticator>,
    io_timeout: Duration,
}

fn action<T: Resource>(verb: &str) -> String {
    format!("clan:{}:{}", T::PATH, verb)
}

fn logged<V>(what: &str, result: Result<V, ServiceError>) -> Result<V, ServiceError> {
    result.inspect_err(|e| warn!("{} error: {}", what, e))
}

/// Build an Axum router for one collection.
///
/// Routes:
///   GET    /{path}        list (public)
///   POST   /{path}        create → `{success, id}`
///   PUT    /{path}/{id}   full replace → `{success}`
///   DELETE /{path}/{id}   delete → `{success}`
pub fn resource_router<T: Resource>(
    ops: ResourceOps<T>,
    auth: Arc<dyn Authenticator>,
    io_timeout: Duration,
) -> Router {
    let state = Arc::new(ResourceState {
        ops,
        auth,
        io_timeout,
    });

    let list_path = format!("/{}", T::PATH);
    let item_path = format!("/{}/{{id}}", T::PATH);

    Router::new()
        .route(&list_path, get(list_handler::<T>).post(create_handler::<T>))
        .route(&item_path, put(update_handler::<T>).delete(delete_handler::<T>))
        .with_state(state)
}

async fn list_handler<T: Resource>(
    State(state): State<Arc<ResourceState<T>>>,
) -> Result<Json<Vec<T>>, ServiceError> {
    let ops = state.ops.clone();
    let items = run_blocking(state.io_timeout, move || ops.list()).await;
    logged(&format!("List {}", T::PATH), items).map(Json)
}

async fn create_handler<T: Resource>(
    State(state): State<Arc<ResourceState<T>>>,
    headers: HeaderMap,
    JsonBody(record): JsonBody<T>,
) -> Result<Json<Value>, ServiceError> {
    state.auth.check(&headers, &action::<T>("create"))?;

    let ops = state.ops.clone();
    let id = run_blocking(state.io_timeout, move || ops.create(record)).await;
    let id = logged(&format!("Create {}", T::NAME), id)?;
    Ok(Json(json!({ "success": true, "id": id })))
}

async fn update_handler<T: Resource>(
    State(state): State<Arc<ResourceState<T>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    JsonBody(record): JsonBody<T>,
) -> Result<Json<Value>, ServiceError> {
    state.auth.check(&headers, &action::<T>("update"))?;

    let ops = state.ops.clone();
    let result = run_blocking(state.io_timeout, move || ops.update(&id, record)).await;
    logged(&format!("Update {}", T::NAME), result)?;
    Ok(Json(json!({ "success": true })))
}

async fn delete_handler<T: Resource>(
    State(state): State<Arc<ResourceState<T>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, ServiceError> {
    state.auth.check(&headers, &action::<T>("delete"))?;

    let ops = state.ops.clone();
    let result = run_blocking(state.io_timeout, move || ops.delete(&id)).await;
    logged(&format!("Delete {}", T::NAME), result)?;
    Ok(Json(json!({ "success": true })))
}

// ── Clan info (singleton) ──

struct ClanInfoState {
    ops: ClanInfoOps,
    auth: Arc<dyn Authenticator>,
    io_timeout: Duration,
}

/// `GET /clan-info` (public) and `PUT /clan-info`.
pub fn clan_info_router(
    ops: ClanInfoOps,
    auth: Arc<dyn Authenticator>,
    io_timeout: Duration,
) -> Router {
    let state = Arc::new(ClanInfoState {
        ops,
        auth,
        io_timeout,
    });
    Router::new()
        .route("/clan-info", get(get_clan_info).put(put_clan_info))
        .with_state(state)
}

async fn get_clan_info(
    State(state): State<Arc<ClanInfoState>>,
) -> Result<Json<ClanInfo>, ServiceError> {
    let ops = state.ops.clone();
    let info = run_blocking(state.io_timeout, move || ops.get()).await;
    logged("Get clan info", info).map(Json)
}

async fn put_clan_info(
    State(state): State<Arc<ClanInfoState>>,
    headers: HeaderMap,
    JsonBody(info): JsonBody<ClanInfo>,
) -> Result<Json<Value>, ServiceError> {
    state.auth.check(&headers, "clan:clan-info:update")?;

    let ops = state.ops.clone();
    let result = run_blocking(state.io_timeout, move || ops.replace(&info)).await;
    logged("Update clan info", result)?;
    Ok(Json(json!({ "success": true })))
}
