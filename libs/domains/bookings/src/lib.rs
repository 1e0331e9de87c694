//! Bookings Domain
//!
//! The rental lifecycle: a renter books an item for a date range, the
//! owner approves or rejects, and both sides list their bookings
//! through temporal state filters (CURRENT, PAST, FUTURE, WAITING,
//! REJECTED, ALL).
//!
//! The filter and last/next-booking computations live in [`state`] as
//! pure functions over a caller-supplied "now", so the temporal edge
//! cases are testable without a clock or a store. This crate also
//! implements the items domain's [`domain_items::BookingGateway`],
//! which is how owner-facing item listings get their booking
//! annotations.

pub mod entity;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod state;

pub use error::{BookingError, BookingResult};
pub use gateway::RepositoryBookingGateway;
pub use models::{Booking, BookingResponse, BookingStatus, CreateBooking};
pub use postgres::PgBookingRepository;
pub use repository::{BookingRepository, InMemoryBookingRepository};
pub use service::BookingService;
pub use state::{filter_by_state, last_and_next, BookingState};
