use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ItemResult;
use crate::models::{CreateItem, Item, UpdateItem};

/// Repository trait for Item persistence
///
/// This trait defines the data access interface for items. Every method
/// returns owned snapshots; callers never hold references into the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items, in insertion order
    async fn list(&self) -> ItemResult<Vec<Item>>;

    /// Get an item by ID
    async fn find(&self, id: Uuid) -> ItemResult<Option<Item>>;

    /// Store a new item, generating its id when the input has none.
    ///
    /// Fails with `ItemError::DuplicateId` if the id is taken.
    async fn insert(&self, input: CreateItem) -> ItemResult<Item>;

    /// Merge `update` into the item with `id` and return the result.
    ///
    /// Returns `None` if no such item exists.
    async fn replace(&self, id: Uuid, update: UpdateItem) -> ItemResult<Option<Item>>;

    /// Delete an item by ID, returning whether it existed
    async fn remove(&self, id: Uuid) -> ItemResult<bool>;
}
