pub mod sqlite;

pub use sqlite::{
    column_exists, run_migrations, MigrationReport, SqliteTaskRepository, TASK_COLUMNS,
};

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info};
use zendo_core::DatabaseConfig;

/// 创建数据库文件所在目录
pub fn ensure_storage_dir(config: &DatabaseConfig) -> Result<()> {
    if let Some(dir) = config.storage_dir() {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("创建存储目录失败: {}", dir.display()))?;
        debug!("存储目录已就绪: {}", dir.display());
    }
    Ok(())
}

/// 打开SQLite连接池，数据库文件不存在时自动创建
///
/// 内存数据库只保留一个常驻连接，否则每个连接会看到各自独立的空库。
pub async fn create_sqlite_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    let mut connect_options = SqliteConnectOptions::from_str(&config.url)
        .with_context(|| format!("无效的数据库URL: {}", config.url))?
        .create_if_missing(true);

    let mut pool_options = SqlitePoolOptions::new();
    if config.is_in_memory() {
        pool_options = pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    } else {
        connect_options = connect_options.journal_mode(SqliteJournalMode::Wal);
        pool_options = pool_options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections);
    }

    let pool = pool_options
        .connect_with(connect_options)
        .await
        .with_context(|| format!("打开数据库失败: {}", config.url))?;

    info!("数据库连接池已创建: {}", config.url);
    Ok(pool)
}
