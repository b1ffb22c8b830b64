//! 仓储操作的错误上下文
//!
//! 为每次数据库操作记录操作类型和涉及的任务，出错时输出结构化日志。
//! 返回给上层的错误保持原始的 `sqlx::Error`，HTTP层直接使用其文本。

use chrono::{DateTime, Utc};
use sqlx::Error as SqlxError;
use std::fmt;
use tracing::{error, info};
use zendo_core::ZendoError;

/// Operation context for repository operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryOperation {
    Create,
    Query,
    Update,
    Delete,
    Migrate,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryOperation::Create => write!(f, "创建"),
            RepositoryOperation::Query => write!(f, "查询"),
            RepositoryOperation::Update => write!(f, "更新"),
            RepositoryOperation::Delete => write!(f, "删除"),
            RepositoryOperation::Migrate => write!(f, "迁移"),
        }
    }
}

/// Context information for task repository operations
#[derive(Debug, Clone)]
pub struct TaskOperationContext {
    pub operation: RepositoryOperation,
    pub task_id: Option<i64>,
    pub task_title: Option<String>,
    pub week_date: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl TaskOperationContext {
    pub fn new(operation: RepositoryOperation) -> Self {
        Self {
            operation,
            task_id: None,
            task_title: None,
            week_date: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_task_id(mut self, task_id: i64) -> Self {
        self.task_id = Some(task_id);
        self
    }

    pub fn with_task_title(mut self, title: String) -> Self {
        self.task_title = Some(title);
        self
    }

    pub fn with_week_date(mut self, week_date: String) -> Self {
        self.week_date = Some(week_date);
        self
    }

    pub fn entity_description(&self) -> String {
        let base = match (&self.task_id, &self.task_title) {
            (Some(id), Some(title)) => format!("任务 '{}' (ID: {})", title, id),
            (Some(id), None) => format!("任务 (ID: {})", id),
            (None, Some(title)) => format!("任务 '{}'", title),
            (None, None) => "任务".to_string(),
        };

        match &self.week_date {
            Some(week) => format!("{} [周: {}]", base, week),
            None => base,
        }
    }
}

pub struct RepositoryErrorHelpers;

impl RepositoryErrorHelpers {
    /// 记录数据库错误并原样向上传递
    pub fn task_database_error(context: TaskOperationContext, error: SqlxError) -> ZendoError {
        let entity_desc = context.entity_description();
        let operation_desc = context.operation.to_string();

        let error_msg = match &error {
            SqlxError::Database(db_error) => {
                format!("{}{}时发生数据库错误: {}", operation_desc, entity_desc, db_error)
            }
            SqlxError::PoolClosed => {
                format!("{}{}时数据库连接池已关闭", operation_desc, entity_desc)
            }
            SqlxError::PoolTimedOut => {
                format!("{}{}时数据库连接池超时", operation_desc, entity_desc)
            }
            SqlxError::Io(io_error) => {
                format!("{}{}时发生I/O错误: {}", operation_desc, entity_desc, io_error)
            }
            _ => {
                format!("{}{}时发生未知数据库错误: {}", operation_desc, entity_desc, error)
            }
        };

        error!(
            operation = %context.operation,
            task_id = ?context.task_id,
            timestamp = %context.timestamp,
            error = %error,
            "{}",
            error_msg
        );
        ZendoError::Database(error)
    }

    pub fn task_not_found(context: TaskOperationContext) -> ZendoError {
        let id = context.task_id.unwrap_or_default();
        info!(
            operation = %context.operation,
            task_id = id,
            "{}{}失败: 任务不存在",
            context.operation,
            context.entity_description()
        );
        ZendoError::task_not_found(id)
    }

    pub fn log_operation_success(
        context: TaskOperationContext,
        entity_desc: &str,
        additional_info: Option<&str>,
    ) {
        let base_msg = format!("{}{}成功", context.operation, entity_desc);

        if let Some(info) = additional_info {
            info!(operation = %context.operation, "{}: {}", base_msg, info);
        } else {
            info!(operation = %context.operation, "{}", base_msg);
        }
    }
}

/// Macro for creating task operation context easily
#[macro_export]
macro_rules! task_context {
    ($operation:expr) => {
        $crate::error_handling::TaskOperationContext::new($operation)
    };
    ($operation:expr, task_id = $task_id:expr) => {
        $crate::error_handling::TaskOperationContext::new($operation).with_task_id($task_id)
    };
    ($operation:expr, week_date = $week_date:expr) => {
        $crate::error_handling::TaskOperationContext::new($operation)
            .with_week_date($week_date.to_string())
    };
    ($operation:expr, task_title = $title:expr, week_date = $week_date:expr) => {
        $crate::error_handling::TaskOperationContext::new($operation)
            .with_task_title($title.to_string())
            .with_week_date($week_date.to_string())
    };
    ($operation:expr, task_id = $task_id:expr, task_title = $title:expr) => {
        $crate::error_handling::TaskOperationContext::new($operation)
            .with_task_id($task_id)
            .with_task_title($title.to_string())
    };
}
