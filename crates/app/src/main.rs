mod logging;
mod settings;

use std::path::Path;
use std::sync::Arc;

use stocksense_api::server::{start_server, AppState};
use stocksense_core::archive::router::ShardRouter;
use stocksense_store::table::InMemoryDataset;
use tracing::{error, info};

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责加载配置、实例化只读数据集并通过 Arc<dyn Trait> 注入到 API 层。
///
/// # Logic
/// 1. 读取 `.env` 与分层配置。
/// 2. 初始化全局日志。
/// 3. 校验归档分片布局并输出路由表。
/// 4. 一次性加载数据集，失败则直接退出。
/// 5. 启动 HTTP 服务，等待外部信号退出。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 配置
    let dotenv_path = settings::load_dotenv(None)?;
    let config = settings::load(None)?;

    // 2. 初始化日志
    let _log_guard = logging::init_tracing(&config.log);
    info!("StockSense starting...");
    if let Some(path) = dotenv_path {
        info!("Loaded environment from {}", path.display());
    }

    // 3. 归档分片布局 (当前仅用于校验与展示，查询接口不经过分片)
    let router = ShardRouter::new(config.archive.shards.clone()).inspect_err(|e| {
        error!("Invalid archive shard layout: {}", e);
    })?;
    let default_range = config.query.default_range();
    for (shard, range) in router.split(&default_range) {
        info!("Archive shard {} serves {}", shard.name, range);
    }

    // 4. 加载数据集
    let dataset = InMemoryDataset::open(Path::new(&config.dataset.path), default_range)
        .inspect_err(|e| {
            error!("Failed to load dataset {}: {}", config.dataset.path, e);
        })?;

    // 5. 启动 HTTP 服务
    let state = AppState {
        dataset: Arc::new(dataset),
    };
    start_server(state, &config.server.bind_addr(), shutdown_signal()).await?;

    info!("Shutdown complete");
    Ok(())
}

/// 等待 Ctrl-C 信号
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received. Exiting..."),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}
