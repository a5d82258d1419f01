//! 核心层：错误处理、请求提取器和中间件

pub mod error;
pub mod extract;
pub mod middleware;

pub use error::ApiError;
