//! In-memory implementation of ItemRepository

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item, UpdateItem};
use crate::repository::ItemRepository;

/// Item store backed by a vector behind an async lock.
///
/// Each method takes the lock exactly once, so every operation is atomic.
#[derive(Debug, Default)]
pub struct InMemoryItemRepository {
    items: RwLock<Vec<Item>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn list(&self) -> ItemResult<Vec<Item>> {
        Ok(self.items.read().await.clone())
    }

    async fn find(&self, id: Uuid) -> ItemResult<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    async fn insert(&self, input: CreateItem) -> ItemResult<Item> {
        let item = Item::new(input);

        let mut items = self.items.write().await;
        if items.iter().any(|existing| existing.id == item.id) {
            return Err(ItemError::DuplicateId(item.id));
        }
        items.push(item.clone());
        debug!(item_id = %item.id, count = items.len(), "Item stored");

        Ok(item)
    }

    async fn replace(&self, id: Uuid, update: UpdateItem) -> ItemResult<Option<Item>> {
        let mut items = self.items.write().await;
        Ok(items.iter_mut().find(|item| item.id == id).map(|item| {
            item.apply_update(update);
            item.clone()
        }))
    }

    async fn remove(&self, id: Uuid) -> ItemResult<bool> {
        let mut items = self.items.write().await;
        match items.iter().position(|item| item.id == id) {
            Some(index) => {
                items.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Extra;
    use std::sync::Arc;

    fn create(name: &str, price: f64) -> CreateItem {
        CreateItem {
            id: None,
            name: name.to_string(),
            price,
            extra: Extra::new(),
        }
    }

    #[tokio::test]
    async fn test_list_is_empty_initially() {
        let repo = InMemoryItemRepository::new();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let repo = InMemoryItemRepository::new();
        for name in ["a", "b", "c"] {
            repo.insert(create(name, 1.0)).await.unwrap();
        }

        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let repo = InMemoryItemRepository::new();
        let first = repo.insert(create("a", 1.0)).await.unwrap();

        let mut again = create("b", 2.0);
        again.id = Some(first.id);
        let err = repo.insert(again).await.unwrap_err();

        assert!(matches!(err, ItemError::DuplicateId(id) if id == first.id));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_returns_snapshot() {
        let repo = InMemoryItemRepository::new();
        let created = repo.insert(create("a", 1.0)).await.unwrap();

        let mut found = repo.find(created.id).await.unwrap().unwrap();
        found.name = "mutated".into();

        let stored = repo.find(created.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "a");
    }

    #[tokio::test]
    async fn test_replace_unknown_id_is_none() {
        let repo = InMemoryItemRepository::new();
        let result = repo
            .replace(Uuid::now_v7(), UpdateItem::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_remove() {
        let repo = InMemoryItemRepository::new();
        let created = repo.insert(create("a", 1.0)).await.unwrap();

        assert!(repo.remove(created.id).await.unwrap());
        assert!(!repo.remove(created.id).await.unwrap());
        assert!(repo.find(created.id).await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_get_unique_ids() {
        let repo = Arc::new(InMemoryItemRepository::new());

        let tasks: Vec<_> = (0..50)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.insert(create(&format!("item-{i}"), 1.0)).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let mut ids: Vec<_> = repo.list().await.unwrap().iter().map(|i| i.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }
}
