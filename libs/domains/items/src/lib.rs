//! Items Domain
//!
//! Listings offered for rent. Owners create and update items, everyone
//! can search available ones, and past renters leave comments.
//!
//! Owner-facing reads are annotated with the last and next approved
//! booking of each item. That data lives in the bookings domain, so it
//! is reached through the [`BookingGateway`] trait; the bookings crate
//! provides the implementation and this crate stays free of a circular
//! dependency.

pub mod entity;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ItemError, ItemResult};
pub use gateway::{BookingGateway, BookingSummary, ItemBookings};
pub use models::{
    Comment, CommentResponse, CreateComment, CreateItem, Item, ItemResponse, UpdateItem,
};
pub use postgres::{PgCommentRepository, PgItemRepository};
pub use repository::{
    CommentRepository, InMemoryCommentRepository, InMemoryItemRepository, ItemRepository,
};
pub use service::ItemService;
