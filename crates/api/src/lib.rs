//! # Zendo API
//!
//! 每周任务清单的HTTP接口，基于Axum构建。
//!
//! ## API 端点
//!
//! - `GET /api/tasks` - 全部任务
//! - `GET /api/tasks/week/{weekDate}` - 指定周的任务
//! - `GET /api/tasks/today` - 今天的任务
//! - `GET /api/tasks/today/week` - 本周的任务
//! - `POST /api/tasks` - 创建任务
//! - `PUT /api/tasks/{id}` - 更新任务
//! - `DELETE /api/tasks/{id}` - 删除任务
//! - `GET /api/timezone`、`GET /api/debug/timezone`、`GET /api/debug/timezones` - 时区信息
//! - `GET /health` - 健康检查
//!
//! 其余路径由前端静态资源处理，参见 [`static_files`]。
//!
//! ## 错误响应
//!
//! 错误以纯文本返回：校验失败为400，任务不存在为404，存储错误为500并附带原始错误信息。
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use zendo_api::create_app;
//! use zendo_core::{AppConfig, WeekClock};
//! # async fn run(task_repo: Arc<dyn zendo_core::TaskRepository>) -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! let app = create_app(
//!     task_repo,
//!     Arc::new(WeekClock::from_name(&config.time.timezone)),
//!     &config.api,
//!     &config.frontend,
//! );
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod static_files;

use axum::{extract::Request, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use zendo_core::{traits::TaskRepository, ApiConfig, FrontendConfig, WeekClock};

use middleware::{cors_layer, request_logging, trace_layer};
use routes::{create_routes, AppState};
use static_files::{serve_frontend, StaticRoot};

pub use error::{ApiError, ApiResult};
pub use routes::API_ENDPOINTS;

/// 创建完整的API应用
pub fn create_app(
    task_repo: Arc<dyn TaskRepository>,
    clock: Arc<WeekClock>,
    api_config: &ApiConfig,
    frontend_config: &FrontendConfig,
) -> Router {
    let state = AppState { task_repo, clock };
    let mut router = create_routes(state);

    if frontend_config.enabled {
        let root = StaticRoot::new(frontend_config);
        router = router.fallback(move |request: Request| serve_frontend(root.clone(), request));
    }

    router.layer(
        ServiceBuilder::new()
            .layer(trace_layer())
            .layer(cors_layer(&api_config.allowed_origins()))
            .layer(axum::middleware::from_fn(request_logging)),
    )
}
