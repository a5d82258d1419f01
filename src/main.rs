//! 产品 API 服务器入口

use anyhow::Context;
use axum::{extract::Request, ServiceExt};
use product_api::{
    build_router,
    infrastructure::{AppConfig, Logger},
    AppState, ProductStore,
};
use tokio::{net::TcpListener, signal};
use tracing::{info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    Logger::init(Level::INFO);

    let config = AppConfig::from_env().context("读取配置失败")?;

    let store = ProductStore::seeded();
    info!("✅ 已初始化 {} 个示例产品", store.len());

    let app = build_router(AppState::new(store), &config);

    let listener = TcpListener::bind(config.address())
        .await
        .with_context(|| format!("无法绑定到 {}", config.address()))?;

    info!("🚀 服务器运行在 http://{}", config.address());
    info!("📖 API 端点:");
    info!("   GET    /                    - 欢迎信息");
    info!("   GET    /api/products        - 产品列表 (category, search, page, limit)");
    info!("   GET    /api/products/search - 搜索产品 (q)");
    info!("   GET    /api/products/stats  - 产品统计");
    info!("   GET    /api/products/:id    - 获取产品");
    info!("   POST   /api/products        - 创建产品");
    info!("   PUT    /api/products/:id    - 更新产品");
    info!("   DELETE /api/products/:id    - 删除产品");
    if config.api_key.is_some() {
        info!("🔑 写操作需要 x-api-key 请求头");
    }

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务器运行失败")?;

    info!("服务器已关闭");
    Ok(())
}

/// 等待 Ctrl+C 或 SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("无法监听 Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("无法监听 SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("收到关闭信号，开始优雅退出");
}
