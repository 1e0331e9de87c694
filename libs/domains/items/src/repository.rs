use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ItemError, ItemResult};
use crate::models::{Comment, Item};

/// Repository trait for Item persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Create a new item
    async fn create(&self, item: Item) -> ItemResult<Item>;

    /// Get an item by ID
    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>>;

    /// Update an existing item
    async fn update(&self, item: Item) -> ItemResult<Item>;

    /// List an owner's items, oldest first
    async fn find_by_owner(&self, owner_id: Uuid) -> ItemResult<Vec<Item>>;

    /// Case-insensitive substring search over name and description,
    /// available items only
    async fn search(&self, text: &str) -> ItemResult<Vec<Item>>;

    /// Items answering any of the given requests
    async fn find_by_request_ids(&self, request_ids: &[Uuid]) -> ItemResult<Vec<Item>>;
}

/// Repository trait for Comment persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Create a new comment
    async fn create(&self, comment: Comment) -> ItemResult<Comment>;

    /// Comments on a single item, oldest first
    async fn find_by_item(&self, item_id: Uuid) -> ItemResult<Vec<Comment>>;

    /// Comments on a whole item set, for batch listings
    async fn find_for_items(&self, item_ids: &[Uuid]) -> ItemResult<Vec<Comment>>;
}

/// In-memory implementation of ItemRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemRepository {
    items: Arc<RwLock<HashMap<Uuid, Item>>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, item: Item) -> ItemResult<Item> {
        let mut items = self.items.write().await;
        items.insert(item.id, item.clone());

        tracing::info!(item_id = %item.id, owner_id = %item.owner_id, "Created item");
        Ok(item)
    }

    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.get(&id).cloned())
    }

    async fn update(&self, item: Item) -> ItemResult<Item> {
        let mut items = self.items.write().await;

        if !items.contains_key(&item.id) {
            return Err(ItemError::NotFound(item.id));
        }

        items.insert(item.id, item.clone());

        tracing::info!(item_id = %item.id, "Updated item");
        Ok(item)
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> ItemResult<Vec<Item>> {
        let items = self.items.read().await;

        let mut result: Vec<Item> = items
            .values()
            .filter(|i| i.owner_id == owner_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        Ok(result)
    }

    async fn search(&self, text: &str) -> ItemResult<Vec<Item>> {
        let needle = text.to_lowercase();
        let items = self.items.read().await;

        let mut result: Vec<Item> = items
            .values()
            .filter(|i| {
                i.available
                    && (i.name.to_lowercase().contains(&needle)
                        || i.description.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        Ok(result)
    }

    async fn find_by_request_ids(&self, request_ids: &[Uuid]) -> ItemResult<Vec<Item>> {
        let items = self.items.read().await;

        let result: Vec<Item> = items
            .values()
            .filter(|i| i.request_id.is_some_and(|r| request_ids.contains(&r)))
            .cloned()
            .collect();

        Ok(result)
    }
}

/// In-memory implementation of CommentRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCommentRepository {
    comments: Arc<RwLock<Vec<Comment>>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self {
            comments: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, comment: Comment) -> ItemResult<Comment> {
        let mut comments = self.comments.write().await;
        comments.push(comment.clone());

        tracing::info!(comment_id = %comment.id, item_id = %comment.item_id, "Created comment");
        Ok(comment)
    }

    async fn find_by_item(&self, item_id: Uuid) -> ItemResult<Vec<Comment>> {
        let comments = self.comments.read().await;

        Ok(comments
            .iter()
            .filter(|c| c.item_id == item_id)
            .cloned()
            .collect())
    }

    async fn find_for_items(&self, item_ids: &[Uuid]) -> ItemResult<Vec<Comment>> {
        let comments = self.comments.read().await;

        Ok(comments
            .iter()
            .filter(|c| item_ids.contains(&c.item_id))
            .cloned()
            .collect())
    }
}
