use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    entity,
    error::{BookingError, BookingResult},
    models::{Booking, BookingStatus},
    repository::BookingRepository,
};

pub struct PgBookingRepository {
    db: DatabaseConnection,
}

impl PgBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create(&self, booking: Booking) -> BookingResult<Booking> {
        let active_model: entity::ActiveModel = booking.into();

        let model = entity::Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
            .map_err(BookingError::from)?;

        tracing::info!(booking_id = %model.id, item_id = %model.item_id, "Created booking");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> BookingResult<Option<Booking>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(BookingError::from)?;

        Ok(model.map(|m| m.into()))
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> BookingResult<Booking> {
        let active_model = entity::ActiveModel {
            id: Set(id),
            status: Set(status),
            ..Default::default()
        };

        let model = entity::Entity::update(active_model)
            .exec(&self.db)
            .await
            .map_err(|e| match e {
                sea_orm::DbErr::RecordNotUpdated => BookingError::NotFound(id),
                other => BookingError::from(other),
            })?;

        tracing::info!(booking_id = %id, status = %status, "Updated booking status");
        Ok(model.into())
    }

    async fn find_by_booker(&self, booker_id: Uuid) -> BookingResult<Vec<Booking>> {
        let models = entity::Entity::find()
            .filter(entity::Column::BookerId.eq(booker_id))
            .order_by_asc(entity::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(BookingError::from)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn find_for_items(
        &self,
        item_ids: &[Uuid],
        status: Option<BookingStatus>,
    ) -> BookingResult<Vec<Booking>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query =
            entity::Entity::find().filter(entity::Column::ItemId.is_in(item_ids.iter().copied()));

        if let Some(status) = status {
            query = query.filter(entity::Column::Status.eq(status));
        }

        let models = query
            .order_by_asc(entity::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(BookingError::from)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}
