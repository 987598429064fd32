//! Catalog domain model: entities, schema descriptor, and query compiler

pub mod entities;
pub mod query;
pub mod schema;
