pub mod campaigns;
pub mod health;

pub use campaigns::api_v1_routes;
pub use health::{AppStartTime, HealthService, health_routes};
