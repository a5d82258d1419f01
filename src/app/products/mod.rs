//! 产品管理：模型、校验、存储、查询和处理器

pub mod handler;
pub mod model;
pub mod query;
pub mod store;
pub mod validation;

pub use handler::AppState;
pub use model::{Product, ProductInput};
pub use store::ProductStore;
