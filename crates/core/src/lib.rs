pub mod config;
pub mod errors;
pub mod models;
pub mod traits;
pub mod week;

pub use config::{ApiConfig, AppConfig, DatabaseConfig, FrontendConfig, ObservabilityConfig, TimeConfig};
pub use errors::*;
pub use models::Task;
pub use traits::TaskRepository;
pub use week::{day_name_of, server_timezone_name, week_start_of, TimezoneSnapshot, WeekClock};
