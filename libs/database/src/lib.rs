//! Database library providing the PostgreSQL connector used by the API.
//!
//! # Examples
//!
//! ```ignore
//! use database::postgres;
//! use core_config::FromEnv;
//! use migration::Migrator;
//!
//! let config = postgres::PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "shareit_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{retry, retry_with_backoff, RetryConfig};
