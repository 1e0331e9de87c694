use async_trait::async_trait;
use sea_orm::sea_query::{Condition, Expr, Func};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    entity,
    error::{ItemError, ItemResult},
    models::{Comment, Item},
    repository::{CommentRepository, ItemRepository},
};

pub struct PgItemRepository {
    db: DatabaseConnection,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn create(&self, item: Item) -> ItemResult<Item> {
        let active_model: entity::item::ActiveModel = item.into();

        let model = entity::item::Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
            .map_err(ItemError::from)?;

        tracing::info!(item_id = %model.id, owner_id = %model.owner_id, "Created item");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>> {
        let model = entity::item::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(ItemError::from)?;

        Ok(model.map(|m| m.into()))
    }

    async fn update(&self, item: Item) -> ItemResult<Item> {
        let id = item.id;
        let active_model: entity::item::ActiveModel = item.into();

        let model = entity::item::Entity::update(active_model)
            .exec(&self.db)
            .await
            .map_err(|e| match e {
                sea_orm::DbErr::RecordNotUpdated => ItemError::NotFound(id),
                other => ItemError::from(other),
            })?;

        tracing::info!(item_id = %id, "Updated item");
        Ok(model.into())
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> ItemResult<Vec<Item>> {
        let models = entity::item::Entity::find()
            .filter(entity::item::Column::OwnerId.eq(owner_id))
            .order_by_asc(entity::item::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(ItemError::from)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn search(&self, text: &str) -> ItemResult<Vec<Item>> {
        let pattern = format!("%{}%", text.to_lowercase());

        let models = entity::item::Entity::find()
            .filter(entity::item::Column::Available.eq(true))
            .filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(entity::item::Column::Name)))
                            .like(&pattern),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col(entity::item::Column::Description)))
                            .like(&pattern),
                    ),
            )
            .order_by_asc(entity::item::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(ItemError::from)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_request_ids(&self, request_ids: &[Uuid]) -> ItemResult<Vec<Item>> {
        if request_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = entity::item::Entity::find()
            .filter(entity::item::Column::RequestId.is_in(request_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(ItemError::from)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

pub struct PgCommentRepository {
    db: DatabaseConnection,
}

impl PgCommentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn with_author(
    (model, author): (entity::comment::Model, Option<domain_users::entity::Model>),
) -> Comment {
    let author_name = author.map(|a| a.name).unwrap_or_default();
    model.into_comment(author_name)
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn create(&self, comment: Comment) -> ItemResult<Comment> {
        let active_model: entity::comment::ActiveModel = comment.clone().into();

        entity::comment::Entity::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(ItemError::from)?;

        tracing::info!(comment_id = %comment.id, item_id = %comment.item_id, "Created comment");
        Ok(comment)
    }

    async fn find_by_item(&self, item_id: Uuid) -> ItemResult<Vec<Comment>> {
        let rows = entity::comment::Entity::find()
            .filter(entity::comment::Column::ItemId.eq(item_id))
            .order_by_asc(entity::comment::Column::CreatedAt)
            .find_also_related(domain_users::entity::Entity)
            .all(&self.db)
            .await
            .map_err(ItemError::from)?;

        Ok(rows.into_iter().map(with_author).collect())
    }

    async fn find_for_items(&self, item_ids: &[Uuid]) -> ItemResult<Vec<Comment>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = entity::comment::Entity::find()
            .filter(entity::comment::Column::ItemId.is_in(item_ids.iter().copied()))
            .order_by_asc(entity::comment::Column::CreatedAt)
            .find_also_related(domain_users::entity::Entity)
            .all(&self.db)
            .await
            .map_err(ItemError::from)?;

        Ok(rows.into_iter().map(with_author).collect())
    }
}
