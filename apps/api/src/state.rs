use crate::config::Config;
use sea_orm::DatabaseConnection;

/// Shared application state passed to route builders.
///
/// Cloning is cheap: the database connection is an Arc-backed pool handle.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DatabaseConnection,
}
