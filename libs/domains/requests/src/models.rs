use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// ItemRequest entity - a wish for an item not yet listed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemRequest {
    /// Unique identifier
    pub id: Uuid,
    /// What the requestor is looking for
    pub description: String,
    /// Requesting user
    pub requestor_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl ItemRequest {
    pub fn new(description: String, requestor_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            description,
            requestor_id,
            created_at: Utc::now(),
        }
    }
}

/// DTO for creating an item request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRequest {
    #[validate(length(min = 1, max = 2000))]
    #[validate(custom(function = not_blank))]
    pub description: String,
}

/// Slim item view attached to request responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnswerItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: Uuid,
}

impl From<domain_items::Item> for AnswerItem {
    fn from(item: domain_items::Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            owner_id: item.owner_id,
        }
    }
}

/// DTO for item request responses, including items answering the request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequestResponse {
    pub id: Uuid,
    pub description: String,
    pub requestor_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub items: Vec<AnswerItem>,
}

impl RequestResponse {
    pub fn from_request(request: ItemRequest, items: Vec<AnswerItem>) -> Self {
        Self {
            id: request.id,
            description: request.description,
            requestor_id: request.requestor_id,
            created_at: request.created_at,
            items,
        }
    }
}
