//! Temporal booking filters.
//!
//! Pure functions over a caller-supplied "now", shared by the booking
//! listings and the item annotation gateway.

use chrono::{DateTime, Utc};
use strum::EnumString;

use crate::models::{Booking, BookingStatus};

/// State keyword accepted by the booking list endpoints.
///
/// Parsing is case-sensitive: `current` is rejected, only `CURRENT`
/// is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum BookingState {
    #[default]
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    fn matches(self, booking: &Booking, now: DateTime<Utc>) -> bool {
        match self {
            BookingState::All => true,
            // Inclusive start: a booking starting exactly now is current
            BookingState::Current => booking.start_date <= now && now < booking.end_date,
            BookingState::Past => booking.end_date < now,
            BookingState::Future => booking.start_date > now,
            BookingState::Waiting => booking.status == BookingStatus::Waiting,
            BookingState::Rejected => booking.status == BookingStatus::Rejected,
        }
    }
}

/// Filter bookings by state keyword and sort by start time descending.
///
/// The sort is stable, so bookings sharing a start time keep their
/// incoming order.
pub fn filter_by_state(
    bookings: Vec<Booking>,
    state: BookingState,
    now: DateTime<Utc>,
) -> Vec<Booking> {
    let mut matched: Vec<Booking> = bookings
        .into_iter()
        .filter(|b| state.matches(b, now))
        .collect();

    matched.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    matched
}

/// Resolve the last and next approved bookings of a single item.
///
/// "Last" is the approved booking with the greatest start time at or
/// before `now`; "next" has the smallest start time after `now`.
pub fn last_and_next(
    bookings: &[Booking],
    now: DateTime<Utc>,
) -> (Option<&Booking>, Option<&Booking>) {
    let approved = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Approved);

    let mut last: Option<&Booking> = None;
    let mut next: Option<&Booking> = None;

    for booking in approved {
        if booking.start_date <= now {
            if last.is_none_or(|l| booking.start_date > l.start_date) {
                last = Some(booking);
            }
        } else if next.is_none_or(|n| booking.start_date < n.start_date) {
            next = Some(booking);
        }
    }

    (last, next)
}
