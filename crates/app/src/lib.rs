//! Cinedex application composition root
//!
//! Composes the accounts and catalog routers into a single application and
//! picks the store implementations (Postgres or in-memory).

pub mod seed;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use cinedex_accounts::AccountsState;
use cinedex_auth::{
    AuthBackend, AuthConfig, CredentialStore, InMemoryCredentialStore, PgCredentialStore,
};
use cinedex_catalog::{
    CatalogSchema, CatalogState, CatalogStore, InMemoryCatalogStore, PgCatalogStore,
};
use cinedex_common::{config::MAX_TOKEN_TTL_HOURS, Config};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
};

/// Largest accepted request body
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Store implementations backing one application instance
#[derive(Clone)]
pub struct Stores {
    pub credentials: Arc<dyn CredentialStore>,
    pub catalog: Arc<dyn CatalogStore>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            credentials: Arc::new(PgCredentialStore::new(pool.clone())),
            catalog: Arc::new(PgCatalogStore::new(pool)),
        }
    }

    /// Process-local stores; contents are lost on restart
    pub fn in_memory() -> Self {
        Self {
            credentials: Arc::new(InMemoryCredentialStore::new()),
            catalog: Arc::new(InMemoryCatalogStore::new()),
        }
    }

    /// Postgres when `DATABASE_URL` is configured, in-memory otherwise
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        match &config.database_url {
            Some(url) => {
                let pool = PgPool::connect(url)
                    .await
                    .context("Database connection failed")?;
                tracing::info!("Database connection established");
                Ok(Self::postgres(pool))
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory stores");
                Ok(Self::in_memory())
            }
        }
    }
}

/// Catalog schema from `CATALOG_SCHEMA`, or the movie schema
pub fn catalog_schema(config: &Config) -> anyhow::Result<CatalogSchema> {
    match &config.catalog_schema {
        Some(descriptor) => CatalogSchema::parse(descriptor).context("Invalid CATALOG_SCHEMA"),
        None => Ok(CatalogSchema::movies()),
    }
}

/// Auth configuration derived from the service configuration.
///
/// The TTL is clamped to the range `Config::from_env` accepts.
pub fn auth_config(config: &Config) -> AuthConfig {
    let hours = config.token_ttl_hours.clamp(1, MAX_TOKEN_TTL_HOURS);
    AuthConfig::new(config.jwt_secret.clone()).with_ttl(chrono::Duration::hours(hours))
}

/// CORS policy: permissive without a configured origin list
pub fn build_cors_layer(allowed_origins: Option<&str>) -> anyhow::Result<CorsLayer> {
    let Some(origins) = allowed_origins else {
        return Ok(CorsLayer::permissive());
    };

    let origins = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

/// Create the main application router with all routes and middleware
pub fn create_app(
    config: &Config,
    auth_config: AuthConfig,
    stores: Stores,
) -> anyhow::Result<Router> {
    let auth = AuthBackend::new(stores.credentials, auth_config);

    let accounts_state = AccountsState { auth: auth.clone() };
    let catalog_state = CatalogState {
        store: stores.catalog,
        schema: Arc::new(catalog_schema(config)?),
        auth,
        default_page_size: config.default_page_size,
    };

    let api = Router::new()
        .merge(cinedex_accounts::routes().with_state(accounts_state))
        .merge(cinedex_catalog::routes().with_state(catalog_state));

    // Build router: domain routes at the root and again under /api
    let app = Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Cinedex API v0.0.1-SNAPSHOT" }),
        )
        .merge(api.clone())
        .nest("/api", api)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(build_cors_layer(config.cors_allowed_origins.as_deref())?);

    Ok(app)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
