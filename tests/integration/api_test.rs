//! API endpoint integration tests
//!
//! Drive the composed router (accounts + catalog) over in-memory stores.

#![allow(dead_code)]

mod auth;
mod common;
mod movies;
mod workflow;
