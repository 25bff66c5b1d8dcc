//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI、配置 CORS 并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 的 DI 容器持有并调用。

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use stocksense_core::dataset::port::DatasetPort;

use crate::routes::{catalog, market, root, sentiment};

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - `dataset` 在服务启动前由 DI 容器加载完成，之后只读，生命周期与进程等同。
#[derive(Clone)]
pub struct AppState {
    /// 只读数据集查询端口
    pub dataset: Arc<dyn DatasetPort>,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stock Analysis API",
        version = "0.1.0",
        description = "股票日线行情与新闻情绪合并数据的只读查询接口。",
        license(name = "MIT")
    ),
    tags(
        (name = "通用 (General)", description = "服务信息"),
        (name = "目录 (Catalog)", description = "公司列表与数据覆盖区间"),
        (name = "行情 (Market)", description = "单只股票 OHLCV 序列"),
        (name = "舆情 (Sentiment)", description = "情绪序列、热力图与每日汇总")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// 构建完整的 axum 应用路由树 (含 Swagger UI 与 CORS)。
pub fn build_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(root::root))
        .routes(routes!(catalog::get_companies))
        .routes(routes!(catalog::get_time_range))
        .routes(routes!(market::get_ohlcv))
        .routes(routes!(sentiment::get_sentiment))
        .routes(routes!(sentiment::get_heatmap))
        .routes(routes!(sentiment::get_daily_stats))
        .with_state(state)
        .split_for_parts();

    // 看板与 API 分开部署，允许所有来源
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// 绑定端口并启动 HTTP 监听，直到 `shutdown` 完成。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:8000"`
/// * `shutdown` - 完成时触发优雅停机的信号
pub async fn start_server(
    state: AppState,
    bind_addr: &str,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("🚀 Stock Analysis API listening on {}", bind_addr);
    tracing::info!("📖 Swagger UI: http://{}/swagger-ui/", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
