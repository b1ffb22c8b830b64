use thiserror::Error;

/// 任务服务错误类型定义
///
/// `Display` 文本会直接作为HTTP响应体返回给调用方，保持简短。
#[derive(Debug, Error)]
pub enum ZendoError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Task not found")]
    TaskNotFound { id: i64 },
}

impl ZendoError {
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    pub fn task_not_found(id: i64) -> Self {
        Self::TaskNotFound { id }
    }
}

/// 统一的Result类型
pub type ZendoResult<T> = std::result::Result<T, ZendoError>;
