use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User entity - an account that can own items, book them, and comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Email address, unique across all users
    pub email: String,
    /// Display name
    pub name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, name: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            email,
            name,
            created_at: Utc::now(),
        }
    }

    /// Apply partial updates; untouched fields keep their values
    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
    }
}

/// DTO for creating a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(email)]
    #[validate(length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// DTO for partially updating a user
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(email)]
    #[validate(length(max = 255))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
}

/// DTO for user responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_update_keeps_unset_fields() {
        let mut user = User::new("a@example.com".to_string(), "Alice".to_string());

        user.apply_update(UpdateUser {
            email: None,
            name: Some("Alicia".to_string()),
        });

        assert_eq!(user.email, "a@example.com");
        assert_eq!(user.name, "Alicia");
    }

    #[test]
    fn create_user_rejects_bad_email() {
        let input = CreateUser {
            email: "not-an-email".to_string(),
            name: "Alice".to_string(),
        };

        assert!(input.validate().is_err());
    }

    #[test]
    fn update_user_allows_empty_payload() {
        let input = UpdateUser::default();
        assert!(input.validate().is_ok());
    }
}
