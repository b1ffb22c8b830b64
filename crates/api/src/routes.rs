use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use zendo_core::{traits::TaskRepository, WeekClock};

use crate::handlers::{
    health::health_check,
    tasks::{
        create_task, delete_task, list_tasks, list_tasks_by_week, list_this_week_tasks,
        list_today_tasks, update_task,
    },
    timezone::{debug_timezone, get_timezone, list_timezones},
};

/// API应用状态
#[derive(Clone)]
pub struct AppState {
    pub task_repo: Arc<dyn TaskRepository>,
    pub clock: Arc<WeekClock>,
}

/// 对外公开的API端点，启动时打印
pub const API_ENDPOINTS: [&str; 10] = [
    "GET    /api/tasks",
    "GET    /api/tasks/week/{weekDate}",
    "GET    /api/tasks/today",
    "GET    /api/tasks/today/week",
    "POST   /api/tasks",
    "PUT    /api/tasks/{id}",
    "DELETE /api/tasks/{id}",
    "GET    /api/timezone",
    "GET    /api/debug/timezone",
    "GET    /api/debug/timezones",
];

/// 创建API路由
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // 任务
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/week/{week_date}", get(list_tasks_by_week))
        .route("/api/tasks/today", get(list_today_tasks))
        .route("/api/tasks/today/week", get(list_this_week_tasks))
        .route("/api/tasks/{id}", put(update_task).delete(delete_task))
        // 时区
        .route("/api/timezone", get(get_timezone))
        .route("/api/debug/timezone", get(debug_timezone))
        .route("/api/debug/timezones", get(list_timezones))
        .with_state(state)
}
