//! # Product API
//!
//! 一个基于 Axum 的产品 REST API 示例：
//! - 内存中的产品存储（启动时预置三条数据）
//! - 请求体校验、分类过滤、关键字搜索、分页和统计
//! - 统一的 JSON 错误响应

pub mod app;
pub mod core;
pub mod infrastructure;

pub use app::{build_router, App};
pub use app::products::{AppState, Product, ProductStore};
pub use crate::core::ApiError;
pub use infrastructure::AppConfig;
