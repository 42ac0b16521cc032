use std::time::Duration;

use anyhow::Context;
use loja_api::infrastructure::logger::Logger;
use loja_api::infrastructure::{Collection, JsonFileStore};
use loja_api::{build_router, AppConfig, AppState};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let _log_guard = Logger::init(&config.logging)?;

    info!("启动 REST API 服务器...");
    let files = JsonFileStore::new(&config.storage);
    for collection in Collection::ALL {
        info!("集合 {} -> {}", collection, files.path(collection).display());
    }

    let state = AppState::from_config(&config);
    let app = build_router(state, Duration::from_secs(config.http.timeout_seconds));

    let addr = config.http.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("🚀 API rodando em http://{}", addr);
    info!("   /produtos  /clientes  /envios  /health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务器运行失败")?;

    info!("服务器已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("无法监听退出信号: {}", e);
    }
}
