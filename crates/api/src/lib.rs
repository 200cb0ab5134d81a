//! HTTP API layer for profrate.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: auth, professors, reviews, votes, favorites, admin
//! - **Extractors**: authentication
//! - **Middleware**: bearer-token resolution
//!
//! Built on Axum 0.8 with Tower middleware stack.

// Allow dead_code for API compatibility fields in request structs
#![allow(dead_code)]

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
