//! tasks 表的创建与增量迁移
//!
//! 迁移只会追加列，不会删除或改写已有数据，重复执行没有副作用。

use sqlx::SqlitePool;
use tracing::{debug, info, instrument};
use zendo_core::{WeekClock, ZendoResult};

use crate::error_handling::{RepositoryErrorHelpers, RepositoryOperation};
use crate::task_context;

const CREATE_TASKS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        completed BOOLEAN DEFAULT FALSE,
        day_of_week TEXT NOT NULL,
        week_date TEXT NOT NULL,
        tags TEXT,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_WEEK_DAY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_tasks_week_day ON tasks(week_date, day_of_week)";

/// 一次迁移的结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub week_date_added: bool,
    pub tags_added: bool,
    /// 被回填 `week_date` 的行数
    pub week_date_backfilled: u64,
    /// 被回填 `tags` 的行数
    pub tags_backfilled: u64,
}

impl MigrationReport {
    pub fn is_noop(&self) -> bool {
        !self.week_date_added && !self.tags_added
    }
}

/// 表 `tasks` 是否已有某列
pub async fn column_exists(pool: &SqlitePool, column: &str) -> ZendoResult<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM pragma_table_info('tasks') WHERE name = ?1")
            .bind(column)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

/// 建表、迁移并创建索引
///
/// 缺少 `week_date` 时补列并用当前周回填，缺少 `tags` 时补列并回填空字符串，两项检查互不依赖。
#[instrument(skip_all, fields(timezone = %clock.timezone_name()))]
pub async fn run_migrations(pool: &SqlitePool, clock: &WeekClock) -> ZendoResult<MigrationReport> {
    let ctx = || task_context!(RepositoryOperation::Migrate);

    sqlx::query(CREATE_TASKS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| RepositoryErrorHelpers::task_database_error(ctx(), e))?;
    debug!("tasks 表已创建或已存在");

    let mut report = MigrationReport::default();

    if !column_exists(pool, "week_date").await? {
        info!("tasks 表缺少 week_date 列，开始迁移");
        sqlx::query("ALTER TABLE tasks ADD COLUMN week_date TEXT")
            .execute(pool)
            .await
            .map_err(|e| RepositoryErrorHelpers::task_database_error(ctx(), e))?;

        let week_date = clock.current_week();
        let result = sqlx::query("UPDATE tasks SET week_date = ?1 WHERE week_date IS NULL")
            .bind(&week_date)
            .execute(pool)
            .await
            .map_err(|e| RepositoryErrorHelpers::task_database_error(ctx(), e))?;

        report.week_date_added = true;
        report.week_date_backfilled = result.rows_affected();
        info!(
            "week_date 列迁移完成，{} 条任务回填为 {}",
            report.week_date_backfilled, week_date
        );
    } else {
        debug!("week_date 列已存在，无需迁移");
    }

    if !column_exists(pool, "tags").await? {
        info!("tasks 表缺少 tags 列，开始迁移");
        sqlx::query("ALTER TABLE tasks ADD COLUMN tags TEXT")
            .execute(pool)
            .await
            .map_err(|e| RepositoryErrorHelpers::task_database_error(ctx(), e))?;

        let result = sqlx::query("UPDATE tasks SET tags = '' WHERE tags IS NULL")
            .execute(pool)
            .await
            .map_err(|e| RepositoryErrorHelpers::task_database_error(ctx(), e))?;

        report.tags_added = true;
        report.tags_backfilled = result.rows_affected();
        info!("tags 列迁移完成，{} 条任务回填为空", report.tags_backfilled);
    } else {
        debug!("tags 列已存在，无需迁移");
    }

    sqlx::query(CREATE_WEEK_DAY_INDEX)
        .execute(pool)
        .await
        .map_err(|e| RepositoryErrorHelpers::task_database_error(ctx(), e))?;

    Ok(report)
}
