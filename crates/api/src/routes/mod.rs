//! # 路由控制器
//!
//! - `root`: 欢迎信息
//! - `catalog`: 公司列表与数据覆盖区间
//! - `market`: 单只股票的 OHLCV 序列
//! - `sentiment`: 情绪序列、跨公司热力图与每日汇总

pub mod catalog;
pub mod market;
pub mod root;
pub mod sentiment;
