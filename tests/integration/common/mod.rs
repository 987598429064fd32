//! Common test utilities and fixtures for integration tests
//!
//! Every `TestApp` gets its own in-memory stores, so tests never share state
//! and need no database.

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use cinedex_app::Stores;
use cinedex_auth::AuthConfig;
use cinedex_catalog::CatalogItem;
use cinedex_common::Config;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_only";

/// Lowest bcrypt cost keeps registration fast in tests
const TEST_PASSWORD_COST: u32 = 4;

pub fn test_config() -> Config {
    Config {
        database_url: None,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        token_ttl_hours: 1,
        catalog_schema: None,
        default_page_size: 10,
        cors_allowed_origins: None,
        log_format: "pretty".to_string(),
        port: 0,
    }
}

/// Test application: composed router plus direct store access for fixtures
pub struct TestApp {
    pub router: Router,
    pub stores: Stores,
}

/// Response status and body; non-JSON bodies come back as a JSON string
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Registered principal with its token
pub struct UserFixture {
    pub id: String,
    pub email: String,
    pub role: String,
    pub token: String,
}

impl TestApp {
    pub fn new() -> Result<Self> {
        Self::with_config(test_config())
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let stores = Stores::in_memory();
        let auth_config = AuthConfig::new(config.jwt_secret.clone())
            .with_password_cost(TEST_PASSWORD_COST);
        let router = cinedex_app::create_app(&config, auth_config, stores.clone())?;

        Ok(Self { router, stores })
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> TestResponse {
        let mut body = json!({"name": name, "email": email, "password": password});
        if let Some(role) = role {
            body["role"] = json!(role);
        }
        self.send(Method::POST, "/auth/register", None, Some(body))
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({"email": email, "password": password})),
        )
        .await
    }

    /// Register a fresh principal and return its fixture
    pub async fn user(&self, role: Option<&str>) -> UserFixture {
        let email = format!("user-{}@example.com", Uuid::new_v4());
        let response = self.register("Fixture User", &email, "password123", role).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);

        UserFixture {
            id: response.body["id"].as_str().unwrap().to_string(),
            email,
            role: response.body["role"].as_str().unwrap().to_string(),
            token: response.body["token"].as_str().unwrap().to_string(),
        }
    }

    pub async fn admin(&self) -> UserFixture {
        self.user(Some("admin")).await
    }

    /// Insert a movie straight into the store
    pub async fn movie(&self, fields: Value) -> CatalogItem {
        let fields = fields.as_object().cloned().unwrap();
        let item = CatalogItem::from_fields(Uuid::new_v4(), fields).unwrap();
        self.stores.catalog.insert(item).await.unwrap()
    }
}

/// Titles of a list response, in order
pub fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap().to_string())
        .collect()
}
