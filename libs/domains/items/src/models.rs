use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::gateway::BookingSummary;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Item entity - a listing offered for rent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Unique identifier
    pub id: Uuid,
    /// Short display name
    pub name: String,
    /// Free-text description, searched together with the name
    pub description: String,
    /// Whether the owner currently accepts bookings
    pub available: bool,
    /// Owning user
    pub owner_id: Uuid,
    /// Item request this listing answers, if any
    pub request_id: Option<Uuid>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Item {
    pub fn new(
        name: String,
        description: String,
        available: bool,
        owner_id: Uuid,
        request_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            name,
            description,
            available,
            owner_id,
            request_id,
            created_at: Utc::now(),
        }
    }

    /// Apply partial updates; untouched fields keep their values
    pub fn apply_update(&mut self, update: UpdateItem) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(available) = update.available {
            self.available = available;
        }
    }
}

/// Comment entity - feedback from a past renter.
///
/// The author's name is denormalized into the domain model so listing
/// reads do not fan out into per-comment user lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub item_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(text: String, item_id: Uuid, author_id: Uuid, author_name: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            text,
            item_id,
            author_id,
            author_name,
            created_at: Utc::now(),
        }
    }
}

/// DTO for creating a new item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 1, max = 255))]
    #[validate(custom(function = not_blank))]
    pub name: String,
    #[validate(length(min = 1, max = 2000))]
    #[validate(custom(function = not_blank))]
    pub description: String,
    pub available: bool,
    pub request_id: Option<Uuid>,
}

/// DTO for partially updating an item
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    #[validate(length(min = 1, max = 255))]
    #[validate(custom(function = not_blank))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    #[validate(custom(function = not_blank))]
    pub description: Option<String>,
    pub available: Option<bool>,
}

/// DTO for creating a comment
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateComment {
    #[validate(length(min = 1, max = 2000))]
    #[validate(custom(function = not_blank))]
    pub text: String,
}

/// DTO for comment responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub id: Uuid,
    pub text: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            author_name: comment.author_name,
            created_at: comment.created_at,
        }
    }
}

/// DTO for item responses.
///
/// `last_booking`/`next_booking` are populated only on owner-facing
/// reads; everyone else sees `null`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: Uuid,
    pub request_id: Option<Uuid>,
    pub last_booking: Option<BookingSummary>,
    pub next_booking: Option<BookingSummary>,
    pub comments: Vec<CommentResponse>,
}

impl ItemResponse {
    pub fn from_item(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            owner_id: item.owner_id,
            request_id: item.request_id,
            last_booking: None,
            next_booking: None,
            comments: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_item_rejects_blank_name() {
        let input = CreateItem {
            name: "   ".to_string(),
            description: "A drill".to_string(),
            available: true,
            request_id: None,
        };

        assert!(input.validate().is_err());
    }

    #[test]
    fn create_comment_rejects_blank_text() {
        let input = CreateComment {
            text: " \t ".to_string(),
        };

        assert!(input.validate().is_err());
    }

    #[test]
    fn apply_update_keeps_unset_fields() {
        let mut item = Item::new(
            "Drill".to_string(),
            "Cordless drill".to_string(),
            true,
            Uuid::now_v7(),
            None,
        );

        item.apply_update(UpdateItem {
            name: None,
            description: None,
            available: Some(false),
        });

        assert_eq!(item.name, "Drill");
        assert_eq!(item.description, "Cordless drill");
        assert!(!item.available);
    }
}
