use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Fields of an item other than `id`, `name` and `price`, kept as sent.
pub type Extra = BTreeMap<String, Value>;

/// Item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Unique identifier, never changes after creation
    pub id: Uuid,
    /// Item name
    pub name: String,
    /// Price
    pub price: f64,
    /// Any other fields supplied by the client
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Extra,
}

/// DTO for creating a new item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    /// Client-chosen id; one is generated when absent
    #[serde(default)]
    pub id: Option<Uuid>,
    #[validate(length(min = 1))]
    pub name: String,
    pub price: f64,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Extra,
}

/// DTO for updating an existing item.
///
/// Only supplied fields are written; `null` counts as not supplied.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub price: Option<f64>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Extra,
}

impl Item {
    /// Create a new item from CreateItem DTO
    pub fn new(input: CreateItem) -> Self {
        Self {
            id: input.id.unwrap_or_else(Uuid::now_v7),
            name: input.name,
            price: input.price,
            extra: input.extra,
        }
    }

    /// Apply updates from UpdateItem DTO
    pub fn apply_update(&mut self, update: UpdateItem) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        self.extra.extend(update.extra);
    }
}
