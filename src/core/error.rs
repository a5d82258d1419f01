//! 核心错误处理模块
//!
//! 所有失败（路由未匹配、请求体解析、校验、处理器错误）都表示为 [`ApiError`]，
//! 并通过同一个 `IntoResponse` 实现渲染为统一的 JSON 错误体：
//!
//! ```json
//! { "error": { "name": "NotFoundError", "message": "...", "statusCode": 404 } }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

/// 核心错误类型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Authentication(String),
    /// 请求体不是合法的 JSON
    #[error("{0}")]
    MalformedBody(String),
    /// 请求体超过大小限制
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// 错误名称，写入响应体的 `error.name`
    pub fn name(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NotFoundError",
            ApiError::Validation(_) => "ValidationError",
            ApiError::Authentication(_) => "AuthenticationError",
            ApiError::MalformedBody(_) => "SyntaxError",
            ApiError::PayloadTooLarge(_) => "PayloadTooLargeError",
            ApiError::Internal(_) => "Error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 面向调用方的消息；内部错误没有消息时使用通用文案
    pub fn message(&self) -> String {
        match self {
            ApiError::Internal(msg) if msg.trim().is_empty() => "Internal Server Error".to_string(),
            other => other.to_string(),
        }
    }
}

/// 错误响应结构
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub name: &'static str,
    pub message: String,
    pub status_code: u16,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: ErrorBody {
                name: err.name(),
                message: err.message(),
                status_code: err.status_code().as_u16(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(name = self.name(), status = status.as_u16(), "{}", self);
        } else {
            warn!(name = self.name(), status = status.as_u16(), "{}", self);
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_error_kind() {
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::authentication("x").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::MalformedBody("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::PayloadTooLarge("x".into()).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body_shape() {
        let body = ErrorResponse::from(&ApiError::not_found("Product with ID 9 not found"));
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "error": {
                    "name": "NotFoundError",
                    "message": "Product with ID 9 not found",
                    "statusCode": 404
                }
            })
        );
    }

    #[test]
    fn test_internal_error_defaults_message() {
        let err = ApiError::Internal(String::new());
        assert_eq!(err.message(), "Internal Server Error");
        assert_eq!(err.name(), "Error");
    }
}
