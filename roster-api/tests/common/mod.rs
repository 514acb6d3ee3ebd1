/// Common test utilities for integration tests
///
/// Builds the real router over an in-memory user repository, so these tests
/// exercise routing, extraction, error mapping and middleware without a
/// database.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use roster_api::app::{build_router, AppState};
use roster_api::config::{ApiConfig, Config, DatabaseConfig};
use roster_shared::repository::{InMemoryUserRepository, UserRepository};
use serde_json::Value;
use std::sync::Arc;
use tower::Service as _;

/// Test context containing the router and the store behind it
pub struct TestContext {
    pub users: Arc<InMemoryUserRepository>,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a context with an empty store
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let app = app_with_repository(users.clone());
        Self { users, app }
    }

    /// Sends a request with an optional JSON body, returning status and parsed body
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => Request::builder().method(method).uri(uri).body(Body::empty()),
        }
        .unwrap();

        send_request(&self.app, request).await
    }

    pub async fn post_user(&self, username: &str, email: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/users",
            Some(serde_json::json!({ "username": username, "email": email })),
        )
        .await
    }
}

/// Configuration that never touches the environment
pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            production: false,
        },
        database: DatabaseConfig {
            url: "postgresql://localhost/unused".to_string(),
            max_connections: 1,
            min_connections: 0,
            connect_timeout_seconds: 1,
            run_migrations: false,
        },
    }
}

/// Builds the router over an arbitrary repository
pub fn app_with_repository(users: Arc<dyn UserRepository>) -> axum::Router {
    build_router(AppState::new(users, test_config()))
}

/// Calls the router and parses a JSON body (Null when the body is empty or not JSON)
pub async fn send_request(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().call(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, json)
}
