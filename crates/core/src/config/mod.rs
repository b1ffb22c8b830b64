//! 配置管理
//!
//! 配置按以下顺序加载，后者覆盖前者：
//!
//! 1. 内置默认值
//! 2. TOML 配置文件（`config/zendo.toml`、`zendo.toml` 或命令行指定的路径）
//! 3. `ZENDO_` 前缀的环境变量，层级用 `__` 分隔，例如 `ZENDO_API__BIND_ADDRESS`
//! 4. 兼容旧部署的 `APP_URL` 环境变量（额外的CORS来源）
//!
//! ```rust,no_run
//! use zendo_core::config::AppConfig;
//!
//! let config = AppConfig::load(None).expect("加载配置失败");
//! println!("监听地址: {}", config.api.bind_address);
//! ```

pub mod models;

pub use models::{
    ApiConfig, AppConfig, DatabaseConfig, FrontendConfig, ObservabilityConfig, TimeConfig,
};
