use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{BookingError, BookingResult};
use crate::models::{Booking, BookingStatus};

/// Repository trait for Booking persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Create a new booking
    async fn create(&self, booking: Booking) -> BookingResult<Booking>;

    /// Get a booking by ID
    async fn get_by_id(&self, id: Uuid) -> BookingResult<Option<Booking>>;

    /// Set the status of an existing booking
    async fn update_status(&self, id: Uuid, status: BookingStatus) -> BookingResult<Booking>;

    /// All bookings made by a user, in creation order
    async fn find_by_booker(&self, booker_id: Uuid) -> BookingResult<Vec<Booking>>;

    /// All bookings of a set of items, optionally restricted to one
    /// status, in creation order
    async fn find_for_items(
        &self,
        item_ids: &[Uuid],
        status: Option<BookingStatus>,
    ) -> BookingResult<Vec<Booking>>;
}

/// In-memory implementation of BookingRepository (for development/testing).
///
/// Backed by a Vec so reads preserve creation order, which the stable
/// state-filter sort relies on for tie-breaking.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBookingRepository {
    bookings: Arc<RwLock<Vec<Booking>>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self {
            bookings: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create(&self, booking: Booking) -> BookingResult<Booking> {
        let mut bookings = self.bookings.write().await;
        bookings.push(booking.clone());

        tracing::info!(booking_id = %booking.id, item_id = %booking.item_id, "Created booking");
        Ok(booking)
    }

    async fn get_by_id(&self, id: Uuid) -> BookingResult<Option<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> BookingResult<Booking> {
        let mut bookings = self.bookings.write().await;

        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(BookingError::NotFound(id))?;

        booking.status = status;

        tracing::info!(booking_id = %id, status = %status, "Updated booking status");
        Ok(booking.clone())
    }

    async fn find_by_booker(&self, booker_id: Uuid) -> BookingResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;

        Ok(bookings
            .iter()
            .filter(|b| b.booker_id == booker_id)
            .cloned()
            .collect())
    }

    async fn find_for_items(
        &self,
        item_ids: &[Uuid],
        status: Option<BookingStatus>,
    ) -> BookingResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;

        Ok(bookings
            .iter()
            .filter(|b| item_ids.contains(&b.item_id))
            .filter(|b| status.is_none_or(|s| b.status == s))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn booking(item_id: Uuid, booker_id: Uuid) -> Booking {
        let now = Utc::now();
        Booking::new(
            item_id,
            booker_id,
            now + Duration::hours(1),
            now + Duration::hours(2),
        )
    }

    #[tokio::test]
    async fn test_create_and_get_booking() {
        let repo = InMemoryBookingRepository::new();

        let created = repo
            .create(booking(Uuid::now_v7(), Uuid::now_v7()))
            .await
            .unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_update_status() {
        let repo = InMemoryBookingRepository::new();

        let created = repo
            .create(booking(Uuid::now_v7(), Uuid::now_v7()))
            .await
            .unwrap();

        let updated = repo
            .update_status(created.id, BookingStatus::Approved)
            .await
            .unwrap();
        assert_eq!(updated.status, BookingStatus::Approved);

        let result = repo
            .update_status(Uuid::now_v7(), BookingStatus::Approved)
            .await;
        assert!(matches!(result, Err(BookingError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_by_booker_preserves_creation_order() {
        let repo = InMemoryBookingRepository::new();
        let booker = Uuid::now_v7();

        let first = repo.create(booking(Uuid::now_v7(), booker)).await.unwrap();
        let second = repo.create(booking(Uuid::now_v7(), booker)).await.unwrap();
        repo.create(booking(Uuid::now_v7(), Uuid::now_v7()))
            .await
            .unwrap();

        let found = repo.find_by_booker(booker).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, first.id);
        assert_eq!(found[1].id, second.id);
    }

    #[tokio::test]
    async fn test_find_for_items_filters_by_status() {
        let repo = InMemoryBookingRepository::new();
        let item = Uuid::now_v7();

        let approved = repo.create(booking(item, Uuid::now_v7())).await.unwrap();
        repo.update_status(approved.id, BookingStatus::Approved)
            .await
            .unwrap();
        repo.create(booking(item, Uuid::now_v7())).await.unwrap();

        let all = repo.find_for_items(&[item], None).await.unwrap();
        assert_eq!(all.len(), 2);

        let only_approved = repo
            .find_for_items(&[item], Some(BookingStatus::Approved))
            .await
            .unwrap();
        assert_eq!(only_approved.len(), 1);
        assert_eq!(only_approved[0].id, approved.id);
    }
}
