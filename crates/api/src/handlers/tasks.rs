use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use zendo_core::models::{NewTask, Task, TaskChanges};
use zendo_core::week::DATE_FORMAT;

use crate::{
    error::{ApiError, ApiResult},
    routes::AppState,
};

/// 任务创建请求
///
/// 字段缺失或为 `null` 时按空值处理，必填校验由存储层完成。
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub day_of_week: Option<String>,
    pub week_date: Option<String>,
    pub tags: Option<String>,
}

impl From<CreateTaskRequest> for NewTask {
    fn from(request: CreateTaskRequest) -> Self {
        NewTask {
            title: request.title.unwrap_or_default(),
            day_of_week: request.day_of_week.unwrap_or_default(),
            week_date: request.week_date.unwrap_or_default(),
            tags: request.tags.unwrap_or_default(),
        }
    }
}

/// 任务更新请求，整体覆盖
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub day_of_week: Option<String>,
    pub week_date: Option<String>,
    pub tags: Option<String>,
}

impl From<UpdateTaskRequest> for TaskChanges {
    fn from(request: UpdateTaskRequest) -> Self {
        TaskChanges {
            title: request.title.unwrap_or_default(),
            completed: request.completed.unwrap_or_default(),
            day_of_week: request.day_of_week.unwrap_or_default(),
            week_date: request.week_date.unwrap_or_default(),
            tags: request.tags.unwrap_or_default(),
        }
    }
}

fn parse_task_id(raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>().map_err(|_| ApiError::invalid_task_id())
}

/// 获取全部任务
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.task_repo.list_all().await?;
    Ok(Json(tasks))
}

/// 获取指定周的任务
pub async fn list_tasks_by_week(
    State(state): State<AppState>,
    Path(week_date): Path<String>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.task_repo.list_by_week(&week_date).await?;
    Ok(Json(tasks))
}

/// 获取今天的任务
pub async fn list_today_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let now = state.clock.now();
    let week_date = state.clock.week_start(now).format(DATE_FORMAT).to_string();
    let day_of_week = state.clock.day_name(now);
    debug!("今天: {} {}", week_date, day_of_week);

    let tasks = state
        .task_repo
        .list_by_week_and_day(&week_date, day_of_week)
        .await?;
    Ok(Json(tasks))
}

/// 获取本周的任务
pub async fn list_this_week_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let week_date = state.clock.current_week();
    debug!("本周: {}", week_date);

    let tasks = state.task_repo.list_by_week(&week_date).await?;
    Ok(Json(tasks))
}

/// 创建任务
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let Json(request) = payload?;

    let task = state.task_repo.create(&request.into()).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// 更新任务
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let id = parse_task_id(&id)?;
    let Json(request) = payload?;

    let task = state.task_repo.update(id, &request.into()).await?;
    Ok(Json(task))
}

/// 删除任务
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_task_id(&id)?;

    state.task_repo.delete(id).await?;
    Ok(Json(json!({ "message": "Task deleted successfully" })))
}
