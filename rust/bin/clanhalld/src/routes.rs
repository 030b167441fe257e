//! Route registration: collects all module routes + system endpoints.

use axum::http::{header, Method};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the complete router with all routes.
///
/// Module routes are merged flat (their paths do not carry the module
/// name) and the whole API is nested under `base_path` when one is set.
pub fn build_router(base_path: &str, module_routes: Vec<(&str, Router)>) -> Router {
    let mut api = Router::new()
        .route("/health", get(health))
        .route("/version", get(version));

    for (name, router) in module_routes {
        info!("Mounted {} routes", name);
        api = api.merge(router);
    }

    let app = match normalize_base_path(base_path) {
        Some(base) => {
            info!("API mounted under {}", base);
            Router::new().nest(&base, api)
        }
        None => api,
    };

    app.layer(cors()).layer(TraceLayer::new_for_http())
}

/// `"/make-server/"` → `Some("/make-server")`; `""` and `"/"` → `None`.
fn normalize_base_path(base_path: &str) -> Option<String> {
    let trimmed = base_path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else if trimmed.starts_with('/') {
        Some(trimmed.to_string())
    } else {
        Some(format!("/{}", trimmed))
    }
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "clanhalld",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use clanhall_core::Module;
    use clanhall_kv::{KVStore, MemoryStore};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(base_path: &str) -> Router {
        let kv: Arc<dyn KVStore> = Arc::new(MemoryStore::new());
        let timeout = Duration::from_secs(2);
        let auth_config = clanhall_auth::AuthConfig::default();
        let auth_module =
            clanhall_auth::AuthModule::new(Arc::clone(&kv), &auth_config, timeout).unwrap();
        let clan_module =
            clanhall_clan::ClanModule::new(kv, auth_module.authenticator(), timeout);
        build_router(
            base_path,
            vec![
                (auth_module.name(), auth_module.routes()),
                (clan_module.name(), clan_module.routes()),
            ],
        )
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            builder = builder.header("authorization", format!("Bearer {}", t));
        }
        match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn login(app: &Router, prefix: &str) -> String {
        let (status, body) = call(
            app,
            request(
                "POST",
                &format!("{}/login", prefix),
                None,
                Some(json!({"username": "admin", "password": "admin123"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        body["token"].as_str().unwrap().to_string()
    }

    #[test]
    fn base_path_normalization() {
        assert_eq!(normalize_base_path(""), None);
        assert_eq!(normalize_base_path("/"), None);
        assert_eq!(normalize_base_path("/api/"), Some("/api".into()));
        assert_eq!(normalize_base_path("api"), Some("/api".into()));
    }

    #[tokio::test]
    async fn system_endpoints() {
        let app = app("");
        let (status, body) = call(&app, request("GET", "/health", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (_, body) = call(&app, request("GET", "/version", None, None)).await;
        assert_eq!(body["name"], "clanhalld");
    }

    #[tokio::test]
    async fn admin_session_end_to_end() {
        let app = app("");
        let token = login(&app, "").await;

        let (status, body) = call(
            &app,
            request("POST", "/verify-token", None, Some(json!({"token": token}))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);

        let (status, body) = call(
            &app,
            request(
                "POST",
                "/wipes",
                Some(&token),
                Some(json!({"server": "eu-main", "date": "2024-06-06", "time": "19:00"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = body["id"].as_str().unwrap().to_string();

        // Public read with an unrelated anonymous key.
        let (status, body) = call(&app, request("GET", "/wipes", Some("anon-key"), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], id);
        assert_eq!(body[0]["time"], "19:00");

        let (status, _) = call(
            &app,
            request("DELETE", &format!("/wipes/{}", id), Some(&token), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn writes_reject_missing_and_garbage_tokens() {
        let app = app("");
        let (status, body) =
            call(&app, request("POST", "/videos", None, Some(json!({"title": "t"})))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");

        let (status, _) = call(
            &app,
            request("PUT", "/clan-info", Some("%%%"), Some(json!({"description": "x"}))),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) =
            call(&app, request("POST", "/login", None, Some(json!({"username": "admin", "password": "nope"})))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn routes_live_under_base_path() {
        let app = app("/make-server-803a1733");
        let token = login(&app, "/make-server-803a1733").await;

        let (status, _) = call(
            &app,
            request(
                "PUT",
                "/make-server-803a1733/clan-info",
                Some(&token),
                Some(json!({"description": "Raiders", "discord": "", "website": ""})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) =
            call(&app, request("GET", "/make-server-803a1733/clan-info", None, None)).await;
        assert_eq!(body["description"], "Raiders");

        let (status, _) = call(&app, request("GET", "/clan-info", None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_preflight_is_answered() {
        let app = app("");
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/wipes")
            .header("origin", "https://clan.example")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "authorization,content-type")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
    }
}
