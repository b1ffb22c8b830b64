pub mod api_observability;
pub mod app_config;
pub mod database;

pub use api_observability::{ApiConfig, FrontendConfig, ObservabilityConfig};
pub use app_config::{AppConfig, TimeConfig};
pub use database::DatabaseConfig;
