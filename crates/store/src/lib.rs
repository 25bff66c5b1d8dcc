//! # `stocksense-store` - 数据集加载与内存查询
//!
//! - `loader`: 启动时一次性读取合并后的 CSV 文件并解析为强类型记录。
//! - `table`: 不可变内存表，实现 `DatasetPort` 提供全部只读查询。

pub mod loader;
pub mod table;
