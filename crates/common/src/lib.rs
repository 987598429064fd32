//! Shared utilities, configuration, and error handling for Cinedex
//!
//! This crate provides common functionality used across the Cinedex service:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP mapping
//! - Request extractors (validated JSON bodies, page requests)

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;

pub use config::Config;
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{page_bounds, Pagination, ValidatedJson};
