use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use domain_items::{BookingGateway, BookingSummary, ItemBookings, ItemError, ItemResult};

use crate::models::{Booking, BookingStatus};
use crate::repository::BookingRepository;
use crate::state::last_and_next;

/// Implementation of the items domain's booking gateway on top of the
/// booking repository.
///
/// Approved bookings for the whole item set are fetched in one query
/// and grouped in memory, so annotating an owner's listing stays a
/// single round trip no matter how many items it spans.
pub struct RepositoryBookingGateway {
    bookings: Arc<dyn BookingRepository>,
}

impl RepositoryBookingGateway {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }
}

fn summary(booking: &Booking) -> BookingSummary {
    BookingSummary {
        id: booking.id,
        booker_id: booking.booker_id,
    }
}

#[async_trait]
impl BookingGateway for RepositoryBookingGateway {
    async fn bookings_for_items(
        &self,
        item_ids: &[Uuid],
    ) -> ItemResult<HashMap<Uuid, ItemBookings>> {
        let approved = self
            .bookings
            .find_for_items(item_ids, Some(BookingStatus::Approved))
            .await
            .map_err(|e| ItemError::Database(e.to_string()))?;

        let mut by_item: HashMap<Uuid, Vec<Booking>> = HashMap::new();
        for booking in approved {
            by_item.entry(booking.item_id).or_default().push(booking);
        }

        let now = Utc::now();
        let annotated = by_item
            .into_iter()
            .map(|(item_id, bookings)| {
                let (last, next) = last_and_next(&bookings, now);
                (
                    item_id,
                    ItemBookings {
                        last: last.map(summary),
                        next: next.map(summary),
                    },
                )
            })
            .collect();

        Ok(annotated)
    }

    async fn has_started_booking(&self, item_id: Uuid, user_id: Uuid) -> ItemResult<bool> {
        let approved = self
            .bookings
            .find_for_items(&[item_id], Some(BookingStatus::Approved))
            .await
            .map_err(|e| ItemError::Database(e.to_string()))?;

        let now = Utc::now();
        Ok(approved
            .iter()
            .any(|b| b.booker_id == user_id && b.start_date < now))
    }
}
