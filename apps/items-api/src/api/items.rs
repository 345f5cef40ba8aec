//! Items API routes
//!
//! This module wires up the items domain to HTTP routes.

use axum::Router;
use domain_items::{InMemoryItemRepository, ItemService, handlers};

/// Create items router
///
/// Every call starts from an empty store.
pub fn router() -> Router {
    let repository = InMemoryItemRepository::new();
    let service = ItemService::new(repository);

    handlers::router(service)
}
