use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use domain_items::repository::ItemRepository;
use domain_users::repository::UserRepository;

use crate::error::{BookingError, BookingResult};
use crate::models::{Booking, BookingResponse, BookingStatus, CreateBooking};
use crate::repository::BookingRepository;
use crate::state::{filter_by_state, BookingState};

/// Service layer for Booking business logic.
///
/// Looks up items and users through their domains' repository traits;
/// the booking store itself never joins across domains.
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    items: Arc<dyn ItemRepository>,
    users: Arc<dyn UserRepository>,
}

impl BookingService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        items: Arc<dyn ItemRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            bookings,
            items,
            users,
        }
    }

    async fn ensure_user_exists(&self, user_id: Uuid) -> BookingResult<()> {
        self.users
            .get_by_id(user_id)
            .await
            .map_err(|e| BookingError::Database(e.to_string()))?
            .ok_or(BookingError::UserNotFound(user_id))?;
        Ok(())
    }

    async fn get_item(&self, item_id: Uuid) -> BookingResult<domain_items::Item> {
        self.items
            .get_by_id(item_id)
            .await
            .map_err(|e| BookingError::Database(e.to_string()))?
            .ok_or(BookingError::ItemNotFound(item_id))
    }

    /// Create a booking in WAITING status.
    ///
    /// Both timestamps must lie strictly in the future and the end must
    /// come strictly after the start.
    #[instrument(skip(self, input), fields(booker_id = %booker_id, item_id = %input.item_id))]
    pub async fn create_booking(
        &self,
        booker_id: Uuid,
        input: CreateBooking,
    ) -> BookingResult<BookingResponse> {
        self.ensure_user_exists(booker_id).await?;
        let item = self.get_item(input.item_id).await?;

        if item.owner_id == booker_id {
            return Err(BookingError::OwnItem);
        }
        if !item.available {
            return Err(BookingError::Unavailable(item.id));
        }

        let now = Utc::now();
        if input.start_date <= now {
            return Err(BookingError::InvalidTimeWindow(
                "start must be in the future".to_string(),
            ));
        }
        if input.end_date <= now {
            return Err(BookingError::InvalidTimeWindow(
                "end must be in the future".to_string(),
            ));
        }
        if input.start_date >= input.end_date {
            return Err(BookingError::InvalidTimeWindow(
                "end must be after start".to_string(),
            ));
        }

        let booking = Booking::new(input.item_id, booker_id, input.start_date, input.end_date);
        let created = self.bookings.create(booking).await?;

        Ok(created.into())
    }

    /// Approve or reject a WAITING booking. Only the item's owner may
    /// decide, and only once.
    #[instrument(skip(self), fields(booking_id = %booking_id, actor_id = %actor_id, approved))]
    pub async fn approve(
        &self,
        actor_id: Uuid,
        booking_id: Uuid,
        approved: bool,
    ) -> BookingResult<BookingResponse> {
        let booking = self
            .bookings
            .get_by_id(booking_id)
            .await?
            .ok_or(BookingError::NotFound(booking_id))?;

        let item = self.get_item(booking.item_id).await?;

        if item.owner_id != actor_id {
            return Err(BookingError::Unauthorized(
                "Only the item owner may decide a booking".to_string(),
            ));
        }
        if booking.status != BookingStatus::Waiting {
            return Err(BookingError::AlreadyDecided);
        }

        let status = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };
        let updated = self.bookings.update_status(booking_id, status).await?;

        Ok(updated.into())
    }

    /// Get a booking, visible only to its booker and the item's owner
    #[instrument(skip(self), fields(booking_id = %booking_id, actor_id = %actor_id))]
    pub async fn get_booking(
        &self,
        actor_id: Uuid,
        booking_id: Uuid,
    ) -> BookingResult<BookingResponse> {
        let booking = self
            .bookings
            .get_by_id(booking_id)
            .await?
            .ok_or(BookingError::NotFound(booking_id))?;

        let item = self.get_item(booking.item_id).await?;

        if booking.booker_id != actor_id && item.owner_id != actor_id {
            return Err(BookingError::Unauthorized(
                "Booking is visible only to its booker and the item owner".to_string(),
            ));
        }

        Ok(booking.into())
    }

    /// List the caller's own bookings filtered by state keyword
    #[instrument(skip(self), fields(booker_id = %booker_id, state = state))]
    pub async fn list_for_booker(
        &self,
        booker_id: Uuid,
        state: &str,
        from: usize,
        size: usize,
    ) -> BookingResult<Vec<BookingResponse>> {
        let state = parse_state(state)?;
        validate_page(size)?;
        self.ensure_user_exists(booker_id).await?;

        let bookings = self.bookings.find_by_booker(booker_id).await?;

        Ok(page(filter_by_state(bookings, state, Utc::now()), from, size))
    }

    /// List bookings of all items the caller owns, filtered by state
    /// keyword. Items are resolved first, then the bookings are fetched
    /// in a single query over the item set.
    #[instrument(skip(self), fields(owner_id = %owner_id, state = state))]
    pub async fn list_for_owner(
        &self,
        owner_id: Uuid,
        state: &str,
        from: usize,
        size: usize,
    ) -> BookingResult<Vec<BookingResponse>> {
        let state = parse_state(state)?;
        validate_page(size)?;
        self.ensure_user_exists(owner_id).await?;

        let item_ids: Vec<Uuid> = self
            .items
            .find_by_owner(owner_id)
            .await
            .map_err(|e| BookingError::Database(e.to_string()))?
            .into_iter()
            .map(|i| i.id)
            .collect();

        let bookings = self.bookings.find_for_items(&item_ids, None).await?;

        Ok(page(filter_by_state(bookings, state, Utc::now()), from, size))
    }
}

fn parse_state(state: &str) -> BookingResult<BookingState> {
    state
        .parse()
        .map_err(|_| BookingError::UnknownState(state.to_string()))
}

fn validate_page(size: usize) -> BookingResult<()> {
    if size == 0 {
        return Err(BookingError::Validation(
            "size must be positive".to_string(),
        ));
    }
    Ok(())
}

fn page(bookings: Vec<Booking>, from: usize, size: usize) -> Vec<BookingResponse> {
    bookings
        .into_iter()
        .skip(from)
        .take(size)
        .map(Into::into)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryBookingRepository;
    use chrono::{Duration, Utc};
    use domain_items::repository::InMemoryItemRepository;
    use domain_items::Item;
    use domain_users::repository::InMemoryUserRepository;
    use domain_users::User;

    struct Fixture {
        users: Arc<InMemoryUserRepository>,
        items: Arc<InMemoryItemRepository>,
        service: BookingService,
    }

    impl Fixture {
        fn new() -> Self {
            let users = Arc::new(InMemoryUserRepository::new());
            let items = Arc::new(InMemoryItemRepository::new());
            let service = BookingService::new(
                Arc::new(InMemoryBookingRepository::new()),
                items.clone(),
                users.clone(),
            );
            Self {
                users,
                items,
                service,
            }
        }

        async fn user(&self, email: &str) -> User {
            self.users
                .create(User::new(email.to_string(), "Someone".to_string()))
                .await
                .unwrap()
        }

        async fn item(&self, owner_id: Uuid, available: bool) -> Item {
            self.items
                .create(Item::new(
                    "Drill".to_string(),
                    "Cordless drill".to_string(),
                    available,
                    owner_id,
                    None,
                ))
                .await
                .unwrap()
        }
    }

    fn window(start_hours: i64, end_hours: i64) -> (chrono::DateTime<Utc>, chrono::DateTime<Utc>) {
        let now = Utc::now();
        (
            now + Duration::hours(start_hours),
            now + Duration::hours(end_hours),
        )
    }

    fn input(item_id: Uuid, start_hours: i64, end_hours: i64) -> CreateBooking {
        let (start_date, end_date) = window(start_hours, end_hours);
        CreateBooking {
            item_id,
            start_date,
            end_date,
        }
    }

    #[tokio::test]
    async fn create_booking_starts_waiting() {
        let fixture = Fixture::new();
        let owner = fixture.user("owner@example.com").await;
        let renter = fixture.user("renter@example.com").await;
        let item = fixture.item(owner.id, true).await;

        let booking = fixture
            .service
            .create_booking(renter.id, input(item.id, 1, 2))
            .await
            .unwrap();

        assert_eq!(booking.status, BookingStatus::Waiting);
        assert_eq!(booking.booker_id, renter.id);
    }

    #[tokio::test]
    async fn cannot_book_own_item() {
        let fixture = Fixture::new();
        let owner = fixture.user("owner@example.com").await;
        let item = fixture.item(owner.id, true).await;

        let result = fixture
            .service
            .create_booking(owner.id, input(item.id, 1, 2))
            .await;

        assert!(matches!(result, Err(BookingError::OwnItem)));
    }

    #[tokio::test]
    async fn cannot_book_unavailable_item() {
        let fixture = Fixture::new();
        let owner = fixture.user("owner@example.com").await;
        let renter = fixture.user("renter@example.com").await;
        let item = fixture.item(owner.id, false).await;

        let result = fixture
            .service
            .create_booking(renter.id, input(item.id, 1, 2))
            .await;

        assert!(matches!(result, Err(BookingError::Unavailable(_))));
    }

    #[tokio::test]
    async fn rejects_inverted_and_past_time_windows() {
        let fixture = Fixture::new();
        let owner = fixture.user("owner@example.com").await;
        let renter = fixture.user("renter@example.com").await;
        let item = fixture.item(owner.id, true).await;

        let inverted = fixture
            .service
            .create_booking(renter.id, input(item.id, 2, 1))
            .await;
        assert!(matches!(inverted, Err(BookingError::InvalidTimeWindow(_))));

        let in_past = fixture
            .service
            .create_booking(renter.id, input(item.id, -2, 1))
            .await;
        assert!(matches!(in_past, Err(BookingError::InvalidTimeWindow(_))));
    }

    #[tokio::test]
    async fn only_owner_may_approve() {
        let fixture = Fixture::new();
        let owner = fixture.user("owner@example.com").await;
        let renter = fixture.user("renter@example.com").await;
        let item = fixture.item(owner.id, true).await;

        let booking = fixture
            .service
            .create_booking(renter.id, input(item.id, 1, 2))
            .await
            .unwrap();

        let by_renter = fixture.service.approve(renter.id, booking.id, true).await;
        assert!(matches!(by_renter, Err(BookingError::Unauthorized(_))));

        let by_owner = fixture
            .service
            .approve(owner.id, booking.id, true)
            .await
            .unwrap();
        assert_eq!(by_owner.status, BookingStatus::Approved);
    }

    #[tokio::test]
    async fn second_decision_is_a_conflict() {
        let fixture = Fixture::new();
        let owner = fixture.user("owner@example.com").await;
        let renter = fixture.user("renter@example.com").await;
        let item = fixture.item(owner.id, true).await;

        let booking = fixture
            .service
            .create_booking(renter.id, input(item.id, 1, 2))
            .await
            .unwrap();

        fixture
            .service
            .approve(owner.id, booking.id, false)
            .await
            .unwrap();

        let again = fixture.service.approve(owner.id, booking.id, true).await;
        assert!(matches!(again, Err(BookingError::AlreadyDecided)));
    }

    #[tokio::test]
    async fn booking_hidden_from_strangers() {
        let fixture = Fixture::new();
        let owner = fixture.user("owner@example.com").await;
        let renter = fixture.user("renter@example.com").await;
        let stranger = fixture.user("stranger@example.com").await;
        let item = fixture.item(owner.id, true).await;

        let booking = fixture
            .service
            .create_booking(renter.id, input(item.id, 1, 2))
            .await
            .unwrap();

        assert!(fixture
            .service
            .get_booking(renter.id, booking.id)
            .await
            .is_ok());
        assert!(fixture
            .service
            .get_booking(owner.id, booking.id)
            .await
            .is_ok());

        let denied = fixture.service.get_booking(stranger.id, booking.id).await;
        assert!(matches!(denied, Err(BookingError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn unknown_state_keyword_is_rejected() {
        let fixture = Fixture::new();
        let renter = fixture.user("renter@example.com").await;

        let result = fixture
            .service
            .list_for_booker(renter.id, "UNSUPPORTED_STATUS", 0, 20)
            .await;

        match result {
            Err(BookingError::UnknownState(state)) => {
                assert_eq!(state, "UNSUPPORTED_STATUS");
            }
            other => panic!("expected UnknownState, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn lowercase_state_keyword_is_rejected() {
        let fixture = Fixture::new();
        let renter = fixture.user("renter@example.com").await;

        let result = fixture
            .service
            .list_for_booker(renter.id, "waiting", 0, 20)
            .await;

        assert!(matches!(result, Err(BookingError::UnknownState(_))));
    }

    #[tokio::test]
    async fn list_for_booker_sorts_by_start_descending() {
        let fixture = Fixture::new();
        let owner = fixture.user("owner@example.com").await;
        let renter = fixture.user("renter@example.com").await;
        let item_a = fixture.item(owner.id, true).await;
        let item_b = fixture.item(owner.id, true).await;

        let early = fixture
            .service
            .create_booking(renter.id, input(item_a.id, 1, 2))
            .await
            .unwrap();
        let late = fixture
            .service
            .create_booking(renter.id, input(item_b.id, 10, 12))
            .await
            .unwrap();

        let listed = fixture
            .service
            .list_for_booker(renter.id, "ALL", 0, 20)
            .await
            .unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, late.id);
        assert_eq!(listed[1].id, early.id);
    }

    #[tokio::test]
    async fn list_for_owner_spans_all_owned_items() {
        let fixture = Fixture::new();
        let owner = fixture.user("owner@example.com").await;
        let renter = fixture.user("renter@example.com").await;
        let other_owner = fixture.user("other@example.com").await;
        let own_item = fixture.item(owner.id, true).await;
        let foreign_item = fixture.item(other_owner.id, true).await;

        fixture
            .service
            .create_booking(renter.id, input(own_item.id, 1, 2))
            .await
            .unwrap();
        fixture
            .service
            .create_booking(renter.id, input(foreign_item.id, 1, 2))
            .await
            .unwrap();

        let listed = fixture
            .service
            .list_for_owner(owner.id, "ALL", 0, 20)
            .await
            .unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].item_id, own_item.id);
    }

    #[tokio::test]
    async fn waiting_filter_hides_decided_bookings() {
        let fixture = Fixture::new();
        let owner = fixture.user("owner@example.com").await;
        let renter = fixture.user("renter@example.com").await;
        let item = fixture.item(owner.id, true).await;

        let decided = fixture
            .service
            .create_booking(renter.id, input(item.id, 1, 2))
            .await
            .unwrap();
        fixture
            .service
            .approve(owner.id, decided.id, false)
            .await
            .unwrap();
        let pending = fixture
            .service
            .create_booking(renter.id, input(item.id, 3, 4))
            .await
            .unwrap();

        let waiting = fixture
            .service
            .list_for_booker(renter.id, "WAITING", 0, 20)
            .await
            .unwrap();
        assert_eq!(waiting.len(), 1);
        assert_eq!(waiting[0].id, pending.id);

        let rejected = fixture
            .service
            .list_for_booker(renter.id, "REJECTED", 0, 20)
            .await
            .unwrap();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].id, decided.id);
    }

    #[tokio::test]
    async fn pagination_applies_after_filtering() {
        let fixture = Fixture::new();
        let owner = fixture.user("owner@example.com").await;
        let renter = fixture.user("renter@example.com").await;
        let item = fixture.item(owner.id, true).await;

        for offset in 1..=3 {
            fixture
                .service
                .create_booking(renter.id, input(item.id, offset, offset + 10))
                .await
                .unwrap();
        }

        let page = fixture
            .service
            .list_for_booker(renter.id, "ALL", 1, 1)
            .await
            .unwrap();
        assert_eq!(page.len(), 1);

        let zero_size = fixture
            .service
            .list_for_booker(renter.id, "ALL", 0, 0)
            .await;
        assert!(matches!(zero_size, Err(BookingError::Validation(_))));
    }
}
