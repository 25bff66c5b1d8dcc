//! # `stocksense-api` - HTTP API 网关
//!
//! 本 crate 是 StockSense 数据看板后端的 HTTP/REST 服务入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收来自看板前端或浏览器的只读查询请求
//! - 解析日期区间参数并调用下层 `DatasetPort`
//! - 将领域模型转换为固定结构的 DTO 返回给前端

pub mod types;
pub mod error;
pub mod routes;
pub mod server;
