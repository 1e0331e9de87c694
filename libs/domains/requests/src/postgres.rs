use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    entity,
    error::{RequestError, RequestResult},
    models::ItemRequest,
    repository::RequestRepository,
};

pub struct PgRequestRepository {
    db: DatabaseConnection,
}

impl PgRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RequestRepository for PgRequestRepository {
    async fn create(&self, request: ItemRequest) -> RequestResult<ItemRequest> {
        let active_model: entity::ActiveModel = request.into();

        let model = entity::Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
            .map_err(RequestError::from)?;

        tracing::info!(request_id = %model.id, requestor_id = %model.requestor_id, "Created item request");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> RequestResult<Option<ItemRequest>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(RequestError::from)?;

        Ok(model.map(|m| m.into()))
    }

    async fn find_by_requestor(&self, requestor_id: Uuid) -> RequestResult<Vec<ItemRequest>> {
        let models = entity::Entity::find()
            .filter(entity::Column::RequestorId.eq(requestor_id))
            .order_by_desc(entity::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(RequestError::from)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn find_others(&self, requestor_id: Uuid) -> RequestResult<Vec<ItemRequest>> {
        let models = entity::Entity::find()
            .filter(entity::Column::RequestorId.ne(requestor_id))
            .order_by_desc(entity::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(RequestError::from)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}
