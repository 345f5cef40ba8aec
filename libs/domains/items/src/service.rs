//! Item Service - Business logic layer

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item, UpdateItem};
use crate::repository::ItemRepository;

/// Item service providing business logic operations
///
/// The service takes raw JSON from the handlers and is the only place where
/// payloads are checked. Shape problems (not an object, wrong types, missing
/// fields) become `ItemError::Validation`; rule violations such as an empty
/// name become `ItemError::InvalidFields`.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    /// Create a new ItemService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List all items
    #[instrument(skip(self))]
    pub async fn get_items(&self) -> ItemResult<Vec<Item>> {
        self.repository.list().await
    }

    /// Get an item by ID
    #[instrument(skip(self))]
    pub async fn get_item(&self, id: Uuid) -> ItemResult<Item> {
        self.repository
            .find(id)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    /// Create a new item from a JSON payload
    #[instrument(skip(self, data))]
    pub async fn create_item(&self, data: Value) -> ItemResult<Item> {
        let input: CreateItem = parse(into_object(data)?)?;
        input.validate()?;

        let item = self.repository.insert(input).await?;
        info!(item_id = %item.id, "Item created");
        Ok(item)
    }

    /// Merge a JSON payload into an existing item
    #[instrument(skip(self, data))]
    pub async fn update_item(&self, id: Uuid, data: Value) -> ItemResult<Item> {
        let mut fields = into_object(data)?;
        // ids are immutable
        fields.remove("id");

        let input: UpdateItem = parse(fields)?;
        input.validate()?;

        let item = self
            .repository
            .replace(id, input)
            .await?
            .ok_or(ItemError::NotFound(id))?;
        info!(item_id = %item.id, "Item updated");
        Ok(item)
    }

    /// Delete an item
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: Uuid) -> ItemResult<()> {
        if !self.repository.remove(id).await? {
            return Err(ItemError::NotFound(id));
        }
        info!(item_id = %id, "Item deleted");
        Ok(())
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

fn into_object(data: Value) -> ItemResult<Map<String, Value>> {
    match data {
        Value::Object(fields) => Ok(fields),
        other => Err(ItemError::Validation(format!(
            "Expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn parse<T: DeserializeOwned>(fields: Map<String, Value>) -> ItemResult<T> {
    serde_json::from_value(Value::Object(fields)).map_err(|e| ItemError::Validation(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
