//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables once at startup
//! and is never mutated afterwards.

use anyhow::Result;
use std::env;

/// Default token lifetime: 7 days
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 7 * 24;

/// Longest accepted token lifetime: 10 years
pub const MAX_TOKEN_TTL_HOURS: i64 = 10 * 365 * 24;

/// Default page size when a caller asks for a page without a size
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Clone)]
pub struct Config {
    /// Postgres connection URL. When absent the service runs on in-memory stores.
    pub database_url: Option<String>,

    /// HMAC secret used to sign bearer tokens
    pub jwt_secret: String,
    pub token_ttl_hours: i64,

    /// Catalog schema descriptor, e.g. `title:search+sort,crew:search,rating:sort`
    pub catalog_schema: Option<String>,
    pub default_page_size: usize,

    /// Comma-separated CORS origins. `None` means permissive.
    pub cors_allowed_origins: Option<String>,

    /// Runtime configuration
    pub log_format: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| anyhow::anyhow!("JWT_SECRET is required"))?;
        if jwt_secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let token_ttl_hours = match env::var("JWT_TTL_HOURS") {
            Ok(raw) => parse_ttl_hours(&raw)?,
            Err(_) => DEFAULT_TOKEN_TTL_HOURS,
        };

        let config = Self {
            database_url: non_empty_var("DATABASE_URL"),
            jwt_secret,
            token_ttl_hours,
            catalog_schema: non_empty_var("CATALOG_SCHEMA"),
            default_page_size: env::var("DEFAULT_PAGE_SIZE")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            cors_allowed_origins: non_empty_var("CORS_ALLOWED_ORIGINS"),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
        };

        Ok(config)
    }

    /// Whether logs should be emitted as JSON lines (`LOG_FORMAT=json`)
    pub fn json_logs(&self) -> bool {
        self.log_format.trim().eq_ignore_ascii_case("json")
    }
}

fn parse_ttl_hours(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|hours| (1..=MAX_TOKEN_TTL_HOURS).contains(hours))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "JWT_TTL_HOURS must be an integer between 1 and {}",
                MAX_TOKEN_TTL_HOURS
            )
        })
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("catalog_schema", &self.catalog_schema)
            .field("default_page_size", &self.default_page_size)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("log_format", &self.log_format)
            .field("port", &self.port)
            .finish()
    }
}
