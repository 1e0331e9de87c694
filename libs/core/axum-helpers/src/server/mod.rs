mod app;
mod health;
mod shutdown;

pub use app::{create_production_app, create_router};
pub use health::{health_router, HealthResponse};
pub use shutdown::ShutdownCoordinator;
