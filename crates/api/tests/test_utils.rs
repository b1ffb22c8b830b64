#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use zendo_api::create_app;
use zendo_core::{traits::TaskRepository, ApiConfig, DatabaseConfig, FrontendConfig, WeekClock};
use zendo_infrastructure::{create_sqlite_pool, run_migrations, SqliteTaskRepository};

/// 2024-01-10 18:00 UTC，洛杉矶时间周三上午
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 18, 0, 0).unwrap()
}

pub fn test_clock() -> Arc<WeekClock> {
    Arc::new(WeekClock::from_name("America/Los_Angeles").fixed_at(fixed_now()))
}

pub fn frontend_disabled() -> FrontendConfig {
    FrontendConfig {
        enabled: false,
        ..FrontendConfig::default()
    }
}

pub struct TestApp {
    pub router: Router,
    pub task_repo: Arc<dyn TaskRepository>,
}

impl TestApp {
    /// 内存SQLite仓储，不提供前端页面
    pub async fn spawn() -> TestApp {
        Self::spawn_with_frontend(frontend_disabled()).await
    }

    pub async fn spawn_with_frontend(frontend: FrontendConfig) -> TestApp {
        Self::with_repository(memory_repository().await, frontend)
    }

    /// 使用指定的API配置（例如额外的CORS来源）
    pub async fn spawn_with_api(api: &ApiConfig) -> TestApp {
        Self::build(memory_repository().await, api, &frontend_disabled())
    }

    pub fn with_repository(task_repo: Arc<dyn TaskRepository>, frontend: FrontendConfig) -> TestApp {
        Self::build(task_repo, &ApiConfig::default(), &frontend)
    }

    fn build(
        task_repo: Arc<dyn TaskRepository>,
        api: &ApiConfig,
        frontend: &FrontendConfig,
    ) -> TestApp {
        let router = create_app(task_repo.clone(), test_clock(), api, frontend);
        TestApp { router, task_repo }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Response {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> Response {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        self.request(Method::DELETE, uri, None).await
    }

    /// 创建任务并返回响应JSON
    pub async fn create_task(&self, title: &str, day: &str, week: &str, tags: &str) -> Value {
        let response = self
            .post_json(
                "/api/tasks",
                serde_json::json!({
                    "title": title,
                    "dayOfWeek": day,
                    "weekDate": week,
                    "tags": tags,
                }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }
}

async fn memory_repository() -> Arc<dyn TaskRepository> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        ..DatabaseConfig::default()
    };
    let pool = create_sqlite_pool(&config)
        .await
        .expect("Failed to open in-memory database");
    run_migrations(&pool, &test_clock())
        .await
        .expect("Failed to run migrations");

    Arc::new(SqliteTaskRepository::new(pool))
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
