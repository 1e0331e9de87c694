use sea_orm::{DatabaseConnection, DbErr};

/// Ping the database to verify the connection is alive.
///
/// Used by readiness probes; a failure means the pool cannot reach
/// PostgreSQL right now.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.ping().await
}
