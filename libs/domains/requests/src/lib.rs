//! Item Requests Domain
//!
//! A user asks for an item nobody has listed yet; owners answer by
//! creating items that reference the request. Request reads are
//! enriched with those answering items through the items domain's
//! repository, fetched per request set rather than per request.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{RequestError, RequestResult};
pub use models::{AnswerItem, CreateRequest, ItemRequest, RequestResponse};
pub use postgres::PgRequestRepository;
pub use repository::{InMemoryRequestRepository, RequestRepository};
pub use service::RequestService;
