//! 应用层：路由组装
//!
//! 请求依次经过：日志 → 路由 →（可选的 API Key 认证）→ 请求体解析 → 校验 → 处理器。
//! 任一阶段失败都会得到一个 [`ApiError`]，由它统一渲染 JSON 错误体；
//! 处理器 panic 由 `CatchPanicLayer` 兜底成 500。

pub mod products;

use axum::{
    extract::OriginalUri,
    middleware,
    routing::{get, post, put, MethodRouter},
    Router,
};
use tower::Layer;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

use crate::core::{
    middleware::{panic_response, request_logging_middleware, require_api_key, ApiKey},
    ApiError,
};
use crate::infrastructure::AppConfig;
use products::{handler, AppState};

/// 对外提供的完整服务：先去掉路径末尾的 `/`，再进入路由
pub type App = NormalizePath<Router>;

pub const WELCOME_MESSAGE: &str =
    "Welcome to the Product API! Go to /api/products to see all products.";

async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

/// 未匹配的路径或方法
pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::not_found(format!("Route {} not found", uri))
}

/// 写操作：配置了 API Key 时挂上认证中间件，只作用于这些方法本身
fn guarded(writes: MethodRouter<AppState>, api_key: Option<&str>) -> MethodRouter<AppState> {
    match api_key {
        Some(key) => {
            writes.route_layer(middleware::from_fn_with_state(ApiKey::new(key), require_api_key))
        }
        None => writes,
    }
}

fn product_routes(config: &AppConfig) -> Router<AppState> {
    let api_key = config.api_key.as_deref();

    Router::new()
        .route(
            "/api/products",
            get(handler::list_products)
                .merge(guarded(post(handler::create_product), api_key))
                .fallback(route_not_found),
        )
        .route(
            "/api/products/search",
            get(handler::search_products).fallback(route_not_found),
        )
        .route(
            "/api/products/stats",
            get(handler::product_stats).fallback(route_not_found),
        )
        .route(
            "/api/products/:id",
            get(handler::get_product)
                .merge(guarded(
                    put(handler::update_product)
                        .delete(handler::delete_product),
                    api_key,
                ))
                .fallback(route_not_found),
        )
}

/// 组装完整的应用
pub fn build_router(state: AppState, config: &AppConfig) -> App {
    let router = Router::new()
        .route("/", get(welcome).fallback(route_not_found))
        .merge(product_routes(config))
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Router::layer 在路由匹配之后才执行，路径规范化必须包在最外层
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
