//! Shared helpers for API integration tests.
//!
//! Tests run the production router over the in-memory store, so they need no
//! database.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use civiclink_api::auth::jwt::{generate_access_token, JwtConfig};
use civiclink_api::config::{LogFormat, ServerConfig, StoreBackend, StoreConfig};
use civiclink_api::router::build_app_router;
use civiclink_api::state::AppState;
use civiclink_core::memory::MemoryStore;
use civiclink_core::roles::Role;
use civiclink_core::store::RoleStore;
use civiclink_core::types::DbId;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
        store: StoreConfig {
            backend: StoreBackend::Memory,
            database_url: None,
            max_connections: 1,
        },
        bootstrap_admin_id: None,
        log_format: LogFormat::Pretty,
    }
}

/// A router over a fresh in-memory store, plus a handle on that store for
/// seeding role grants.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub config: ServerConfig,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let config = test_config();
        let state = AppState::from_store(store.clone(), config.clone());
        Self {
            router: build_app_router(state),
            store,
            config,
        }
    }

    /// Bearer token for `user_id`.
    pub fn token(&self, user_id: DbId) -> String {
        generate_access_token(user_id, &self.config.jwt).unwrap()
    }

    /// A new identity holding `role`, with its token.
    pub async fn user_with_role(&self, role: Role) -> (DbId, String) {
        let id = Uuid::new_v4();
        self.store.grant(id, role).await.unwrap();
        (id, self.token(id))
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };
        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response<Body> {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: serde_json::Value) -> Response<Body> {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: serde_json::Value) -> Response<Body> {
        self.send(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Response<Body> {
        self.send(Method::DELETE, uri, token, None).await
    }
}

/// Read the full response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A valid complaint submission.
pub fn pothole(is_anonymous: bool) -> serde_json::Value {
    serde_json::json!({
        "category": "pothole",
        "description": "Large pothole outside the metro station",
        "location": { "lat": 12.9716, "lng": 77.5946, "address": "MG Road" },
        "is_anonymous": is_anonymous,
    })
}
