//! API routes module
//!
//! This module defines all HTTP API routes for the Items API.

pub mod items;

use axum::Router;

/// Create all API routes
pub fn routes() -> Router {
    Router::new().nest("/items", items::router())
}
