use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Booking lifecycle status.
///
/// `Waiting` is the only non-terminal state; once a booking is
/// approved or rejected it never transitions again.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "booking_status")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum BookingStatus {
    /// Awaiting the owner's decision
    #[default]
    #[sea_orm(string_value = "waiting")]
    Waiting,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Booking entity - a date-ranged rental of an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    /// Unique identifier
    pub id: Uuid,
    /// Booked item
    pub item_id: Uuid,
    /// Renting user
    pub booker_id: Uuid,
    /// Rental start
    pub start_date: DateTime<Utc>,
    /// Rental end
    pub end_date: DateTime<Utc>,
    /// Lifecycle status
    pub status: BookingStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        item_id: Uuid,
        booker_id: Uuid,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            item_id,
            booker_id,
            start_date,
            end_date,
            status: BookingStatus::Waiting,
            created_at: Utc::now(),
        }
    }
}

/// DTO for creating a booking
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    pub item_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// DTO for booking responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub booker_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: BookingStatus,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            item_id: booking.item_id,
            booker_id: booking.booker_id,
            start_date: booking.start_date,
            end_date: booking.end_date,
            status: booking.status,
        }
    }
}
