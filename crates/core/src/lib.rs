//! # `stocksense-core` - 领域核心
//!
//! 定义每日公司行情/舆情记录实体、只读查询端口、日期区间值对象、
//! 文章归档分片路由规则以及全局配置结构。本 crate 不包含任何 I/O 实现，
//! 具体的数据加载由 `stocksense-store` 负责。

pub mod common;
pub mod config;

pub mod dataset {
    pub mod entity;
    pub mod error;
    pub mod port;
}

pub mod archive {
    pub mod error;
    pub mod router;
}
