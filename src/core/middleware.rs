//! 核心中间件模块

use std::{any::Any, sync::Arc, time::Instant};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use super::error::ApiError;

/// API Key 请求头名称
pub const API_KEY_HEADER: &str = "x-api-key";

/// 请求日志中间件
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let timestamp = chrono::Utc::now().to_rfc3339();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let status = response.status();
    let duration = start.elapsed();

    info!(
        "[{}] {} {} - {} - {}ms",
        timestamp,
        method,
        uri,
        status,
        duration.as_millis()
    );

    response
}

/// 认证中间件使用的共享密钥
#[derive(Clone)]
pub struct ApiKey(pub Arc<str>);

impl ApiKey {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }
}

/// 认证中间件，只挂在写操作（POST / PUT / DELETE）的处理器上
pub async fn require_api_key(
    State(expected): State<ApiKey>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok());

    match provided {
        None => Err(ApiError::authentication("API key is required")),
        Some(key) if key != &*expected.0 => Err(ApiError::authentication("Invalid API key")),
        Some(_) => Ok(next.run(req).await),
    }
}

/// 处理器 panic 时的兜底响应，交给 `CatchPanicLayer::custom` 使用
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "未知 panic".to_string()
    };

    error!("处理器 panic: {}", detail);

    ApiError::Internal(String::new()).into_response()
}
