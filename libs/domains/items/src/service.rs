use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use domain_users::repository::UserRepository;

use crate::error::{ItemError, ItemResult};
use crate::gateway::BookingGateway;
use crate::models::{
    Comment, CommentResponse, CreateComment, CreateItem, Item, ItemResponse, UpdateItem,
};
use crate::repository::{CommentRepository, ItemRepository};

/// Service layer for Item business logic.
///
/// Collaborates with the users domain to resolve acting users and with
/// the bookings domain (through [`BookingGateway`]) for owner-facing
/// booking annotations and comment eligibility.
pub struct ItemService {
    items: Arc<dyn ItemRepository>,
    comments: Arc<dyn CommentRepository>,
    users: Arc<dyn UserRepository>,
    bookings: Arc<dyn BookingGateway>,
}

impl ItemService {
    pub fn new(
        items: Arc<dyn ItemRepository>,
        comments: Arc<dyn CommentRepository>,
        users: Arc<dyn UserRepository>,
        bookings: Arc<dyn BookingGateway>,
    ) -> Self {
        Self {
            items,
            comments,
            users,
            bookings,
        }
    }

    async fn ensure_user_exists(&self, user_id: Uuid) -> ItemResult<domain_users::User> {
        self.users
            .get_by_id(user_id)
            .await
            .map_err(|e| ItemError::Database(e.to_string()))?
            .ok_or(ItemError::UserNotFound(user_id))
    }

    /// Create a new item owned by `owner_id`
    #[instrument(skip(self, input), fields(owner_id = %owner_id))]
    pub async fn create_item(&self, owner_id: Uuid, input: CreateItem) -> ItemResult<ItemResponse> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        self.ensure_user_exists(owner_id).await?;

        let item = Item::new(
            input.name,
            input.description,
            input.available,
            owner_id,
            input.request_id,
        );
        let created = self.items.create(item).await?;

        Ok(ItemResponse::from_item(created))
    }

    /// Partially update an item. Non-owners are told the item does not
    /// exist rather than that it belongs to someone else.
    #[instrument(skip(self, input), fields(item_id = %item_id, actor_id = %actor_id))]
    pub async fn update_item(
        &self,
        actor_id: Uuid,
        item_id: Uuid,
        input: UpdateItem,
    ) -> ItemResult<ItemResponse> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        let mut item = self
            .items
            .get_by_id(item_id)
            .await?
            .ok_or(ItemError::NotFound(item_id))?;

        if item.owner_id != actor_id {
            return Err(ItemError::NotFound(item_id));
        }

        item.apply_update(input);
        let updated = self.items.update(item).await?;

        Ok(ItemResponse::from_item(updated))
    }

    /// Get a single item with its comments. The owner additionally sees
    /// the last and next approved bookings.
    #[instrument(skip(self), fields(item_id = %item_id, viewer_id = %viewer_id))]
    pub async fn get_item(&self, viewer_id: Uuid, item_id: Uuid) -> ItemResult<ItemResponse> {
        let item = self
            .items
            .get_by_id(item_id)
            .await?
            .ok_or(ItemError::NotFound(item_id))?;

        let owner_id = item.owner_id;
        let mut response = ItemResponse::from_item(item);

        response.comments = self
            .comments
            .find_by_item(item_id)
            .await?
            .into_iter()
            .map(CommentResponse::from)
            .collect();

        if viewer_id == owner_id {
            let bookings = self.bookings.bookings_for_items(&[item_id]).await?;
            if let Some(pair) = bookings.get(&item_id) {
                response.last_booking = pair.last;
                response.next_booking = pair.next;
            }
        }

        Ok(response)
    }

    /// List an owner's items with booking annotations and comments.
    ///
    /// Bookings and comments are fetched once for the whole page and
    /// grouped in memory, not queried per item.
    #[instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn list_owner_items(
        &self,
        owner_id: Uuid,
        from: usize,
        size: usize,
    ) -> ItemResult<Vec<ItemResponse>> {
        validate_page(size)?;
        self.ensure_user_exists(owner_id).await?;

        let items: Vec<Item> = self
            .items
            .find_by_owner(owner_id)
            .await?
            .into_iter()
            .skip(from)
            .take(size)
            .collect();

        let item_ids: Vec<Uuid> = items.iter().map(|i| i.id).collect();
        let bookings = self.bookings.bookings_for_items(&item_ids).await?;

        let mut comments_by_item: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for comment in self.comments.find_for_items(&item_ids).await? {
            comments_by_item
                .entry(comment.item_id)
                .or_default()
                .push(comment);
        }

        let responses = items
            .into_iter()
            .map(|item| {
                let id = item.id;
                let mut response = ItemResponse::from_item(item);

                if let Some(pair) = bookings.get(&id) {
                    response.last_booking = pair.last;
                    response.next_booking = pair.next;
                }
                response.comments = comments_by_item
                    .remove(&id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(CommentResponse::from)
                    .collect();

                response
            })
            .collect();

        Ok(responses)
    }

    /// Search available items by name or description. A blank query
    /// returns an empty list without touching the store.
    #[instrument(skip(self))]
    pub async fn search_items(
        &self,
        text: &str,
        from: usize,
        size: usize,
    ) -> ItemResult<Vec<ItemResponse>> {
        validate_page(size)?;

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let items = self.items.search(text).await?;

        Ok(items
            .into_iter()
            .skip(from)
            .take(size)
            .map(ItemResponse::from_item)
            .collect())
    }

    /// Add a comment to an item. Only users with an approved booking
    /// that has already started may comment; the owner never can.
    #[instrument(skip(self, input), fields(item_id = %item_id, author_id = %author_id))]
    pub async fn add_comment(
        &self,
        author_id: Uuid,
        item_id: Uuid,
        input: CreateComment,
    ) -> ItemResult<CommentResponse> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        let item = self
            .items
            .get_by_id(item_id)
            .await?
            .ok_or(ItemError::NotFound(item_id))?;

        let author = self.ensure_user_exists(author_id).await?;

        if item.owner_id == author_id {
            return Err(ItemError::CommentNotAllowed(
                "Owners cannot comment on their own items".to_string(),
            ));
        }

        if !self.bookings.has_started_booking(item_id, author_id).await? {
            return Err(ItemError::CommentNotAllowed(
                "No approved booking of this item has started yet".to_string(),
            ));
        }

        let comment = Comment::new(input.text, item_id, author_id, author.name);
        let created = self.comments.create(comment).await?;

        Ok(created.into())
    }
}

fn validate_page(size: usize) -> ItemResult<()> {
    if size == 0 {
        return Err(ItemError::Validation("size must be positive".to_string()));
    }
    Ok(())
}
