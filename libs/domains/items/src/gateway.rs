use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ItemResult;

/// Compact view of a booking, enough for owner-facing item listings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingSummary {
    pub id: Uuid,
    pub booker_id: Uuid,
}

/// Last and next approved bookings of a single item
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ItemBookings {
    /// Approved booking with the greatest start time at or before now
    pub last: Option<BookingSummary>,
    /// Approved booking with the smallest start time after now
    pub next: Option<BookingSummary>,
}

/// Read access to booking data owned by the bookings domain.
///
/// Implemented over there; items only consume it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// Resolve last/next approved bookings for a whole item set in one
    /// lookup. Items without approved bookings are absent from the map.
    async fn bookings_for_items(
        &self,
        item_ids: &[Uuid],
    ) -> ItemResult<HashMap<Uuid, ItemBookings>>;

    /// Whether the user has an approved booking of the item that has
    /// already started
    async fn has_started_booking(&self, item_id: Uuid, user_id: Uuid) -> ItemResult<bool>;
}
