use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{UserError, UserResult},
    models::User,
    repository::UserRepository,
};

pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let active_model: entity::ActiveModel = user.into();

        let model = entity::Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
            .map_err(UserError::from)?;

        tracing::info!(user_id = %model.id, "Created user");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(UserError::from)?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(UserError::from)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let id = user.id;
        let active_model: entity::ActiveModel = user.into();

        let model = entity::Entity::update(active_model)
            .exec(&self.db)
            .await
            .map_err(|e| match e {
                sea_orm::DbErr::RecordNotUpdated => UserError::NotFound(id),
                other => UserError::from(other),
            })?;

        tracing::info!(user_id = %id, "Updated user");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(UserError::from)?;

        if result.rows_affected > 0 {
            tracing::info!(user_id = %id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> UserResult<bool> {
        let mut query = entity::Entity::find().filter(entity::Column::Email.eq(email));

        if let Some(id) = exclude {
            query = query.filter(entity::Column::Id.ne(id));
        }

        let count = query.count(&self.db).await.map_err(UserError::from)?;

        Ok(count > 0)
    }
}
