//! 任务仓储抽象
//!
//! API层只依赖这个接口，具体实现（SQLite）由基础设施层提供并在启动时注入。

use async_trait::async_trait;

use crate::models::{NewTask, Task, TaskChanges};
use crate::ZendoResult;

/// 任务仓储抽象
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// 全部任务，按 `(day_of_week, created_at)` 升序
    async fn list_all(&self) -> ZendoResult<Vec<Task>>;

    /// 指定周的任务，`week_date` 精确匹配，排序同 [`TaskRepository::list_all`]
    async fn list_by_week(&self, week_date: &str) -> ZendoResult<Vec<Task>>;

    /// 指定周、指定星期的任务，按 `created_at` 升序
    async fn list_by_week_and_day(
        &self,
        week_date: &str,
        day_of_week: &str,
    ) -> ZendoResult<Vec<Task>>;

    /// 创建任务，必填字段为空时返回 `Validation`
    async fn create(&self, task: &NewTask) -> ZendoResult<Task>;

    /// 整体覆盖任务字段，任务不存在时返回 `TaskNotFound`
    async fn update(&self, id: i64, changes: &TaskChanges) -> ZendoResult<Task>;

    /// 删除任务，任务不存在时返回 `TaskNotFound`
    async fn delete(&self, id: i64) -> ZendoResult<()>;
}
