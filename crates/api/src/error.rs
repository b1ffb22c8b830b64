use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};
use zendo_core::ZendoError;

/// 路径中的任务ID不是整数
pub const INVALID_TASK_ID_MESSAGE: &str = "Invalid task ID";

/// HTTP层错误
///
/// 响应体是纯文本，前端直接展示。
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Zendo(#[from] ZendoError),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn invalid_task_id() -> Self {
        Self::BadRequest(INVALID_TASK_ID_MESSAGE.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Zendo(ZendoError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Zendo(ZendoError::TaskNotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Zendo(ZendoError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = %status, "请求处理失败: {}", message);
        } else {
            warn!(status = %status, "请求被拒绝: {}", message);
        }

        (status, message).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(ZendoError::validation("missing")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ZendoError::task_not_found(1)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(ZendoError::Database(sqlx::Error::PoolClosed)).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::invalid_task_id().status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_database_error_text_is_raw() {
        let err = ApiError::from(ZendoError::Database(sqlx::Error::PoolClosed));
        assert_eq!(err.to_string(), sqlx::Error::PoolClosed.to_string());
    }
}
