use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::{debug, instrument};
use zendo_core::{
    models::{NewTask, Task, TaskChanges},
    traits::TaskRepository,
    DatabaseConfig, WeekClock, ZendoResult,
};

use super::schema::{run_migrations, MigrationReport};
use crate::{
    database::{create_sqlite_pool, ensure_storage_dir},
    error_handling::{RepositoryErrorHelpers, RepositoryOperation},
    task_context,
};

pub const TASK_COLUMNS: &str =
    "id, title, completed, day_of_week, week_date, tags, created_at, updated_at";

/// 时间戳统一写成定宽文本，保证按字符串排序即为时间顺序
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

fn now_timestamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 创建存储目录、打开数据库并执行迁移
    pub async fn open(
        config: &DatabaseConfig,
        clock: &WeekClock,
    ) -> anyhow::Result<(Self, MigrationReport)> {
        ensure_storage_dir(config)?;
        let pool = create_sqlite_pool(config).await?;
        let report = run_migrations(&pool, clock).await?;
        Ok((Self::new(pool), report))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn row_to_task(row: &SqliteRow) -> ZendoResult<Task> {
        let completed: Option<bool> = row.try_get("completed")?;
        let week_date: Option<String> = row.try_get("week_date")?;
        let tags: Option<String> = row.try_get("tags")?;

        Ok(Task {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            completed: completed.unwrap_or(false),
            day_of_week: row.try_get("day_of_week")?,
            week_date: week_date.unwrap_or_default(),
            tags: tags.unwrap_or_default(),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn rows_to_tasks(rows: &[SqliteRow]) -> ZendoResult<Vec<Task>> {
        rows.iter().map(Self::row_to_task).collect()
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    #[instrument(skip(self))]
    async fn list_all(&self) -> ZendoResult<Vec<Task>> {
        let context = task_context!(RepositoryOperation::Query);

        let rows = sqlx::query(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY day_of_week, created_at, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryErrorHelpers::task_database_error(context, e))?;

        let tasks = Self::rows_to_tasks(&rows)?;
        debug!("查询全部任务: {} 条", tasks.len());
        Ok(tasks)
    }

    #[instrument(skip(self), fields(week_date = %week_date))]
    async fn list_by_week(&self, week_date: &str) -> ZendoResult<Vec<Task>> {
        let context = task_context!(RepositoryOperation::Query, week_date = week_date);

        let rows = sqlx::query(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE week_date = ?1 ORDER BY day_of_week, created_at, id"
        ))
        .bind(week_date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryErrorHelpers::task_database_error(context, e))?;

        let tasks = Self::rows_to_tasks(&rows)?;
        debug!("查询周 {} 的任务: {} 条", week_date, tasks.len());
        Ok(tasks)
    }

    #[instrument(skip(self), fields(week_date = %week_date, day_of_week = %day_of_week))]
    async fn list_by_week_and_day(
        &self,
        week_date: &str,
        day_of_week: &str,
    ) -> ZendoResult<Vec<Task>> {
        let context = task_context!(RepositoryOperation::Query, week_date = week_date);

        let rows = sqlx::query(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE week_date = ?1 AND day_of_week = ?2 ORDER BY created_at, id"
        ))
        .bind(week_date)
        .bind(day_of_week)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryErrorHelpers::task_database_error(context, e))?;

        let tasks = Self::rows_to_tasks(&rows)?;
        debug!(
            "查询周 {} {} 的任务: {} 条",
            week_date,
            day_of_week,
            tasks.len()
        );
        Ok(tasks)
    }

    #[instrument(skip(self, task), fields(
        task_title = %task.title,
        day_of_week = %task.day_of_week,
        week_date = %task.week_date,
    ))]
    async fn create(&self, task: &NewTask) -> ZendoResult<Task> {
        task.validate()?;

        let context = task_context!(
            RepositoryOperation::Create,
            task_title = &task.title,
            week_date = &task.week_date
        );
        let now = now_timestamp();

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO tasks (title, completed, day_of_week, week_date, tags, created_at, updated_at)
            VALUES (?1, FALSE, ?2, ?3, ?4, ?5, ?5)
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(&task.title)
        .bind(&task.day_of_week)
        .bind(&task.week_date)
        .bind(&task.tags)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryErrorHelpers::task_database_error(context.clone(), e))?;

        let created_task = Self::row_to_task(&row)?;
        RepositoryErrorHelpers::log_operation_success(
            context,
            &created_task.entity_description(),
            Some(&format!(
                "ID: {}, 周: {}, 星期: {}",
                created_task.id, created_task.week_date, created_task.day_of_week
            )),
        );
        Ok(created_task)
    }

    #[instrument(skip(self, changes), fields(task_id = %id))]
    async fn update(&self, id: i64, changes: &TaskChanges) -> ZendoResult<Task> {
        let context = task_context!(
            RepositoryOperation::Update,
            task_id = id,
            task_title = &changes.title
        );

        let row = sqlx::query(&format!(
            r#"
            UPDATE tasks
            SET title = ?1, completed = ?2, day_of_week = ?3, week_date = ?4, tags = ?5, updated_at = ?6
            WHERE id = ?7
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(&changes.title)
        .bind(changes.completed)
        .bind(&changes.day_of_week)
        .bind(&changes.week_date)
        .bind(&changes.tags)
        .bind(now_timestamp())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryErrorHelpers::task_database_error(context.clone(), e))?;

        match row {
            Some(row) => {
                let task = Self::row_to_task(&row)?;
                RepositoryErrorHelpers::log_operation_success(
                    context,
                    &task.entity_description(),
                    Some(&format!("ID: {}, 已完成: {}", task.id, task.completed)),
                );
                Ok(task)
            }
            None => Err(RepositoryErrorHelpers::task_not_found(context)),
        }
    }

    #[instrument(skip(self), fields(task_id = %id))]
    async fn delete(&self, id: i64) -> ZendoResult<()> {
        let context = task_context!(RepositoryOperation::Delete, task_id = id);

        let result = sqlx::query("DELETE FROM tasks WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryErrorHelpers::task_database_error(context.clone(), e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryErrorHelpers::task_not_found(context));
        }

        RepositoryErrorHelpers::log_operation_success(context, &format!("任务 (ID: {})", id), None);
        Ok(())
    }
}
