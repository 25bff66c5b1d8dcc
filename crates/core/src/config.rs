use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::archive::router::ArchiveShard;
use crate::common::DateRange;

/// 全局应用配置
///
/// # Invariants
/// - 所有字段均可缺省，缺省值取自各子配置的 `Default` 实现。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
    pub query: QueryConfig,
    pub archive: ArchiveConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// 监听地址，形如 `"0.0.0.0:8000"`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// 合并后 CSV 数据文件路径
    pub path: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: "combined_analysis_jan_june_2024.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub default_start_date: NaiveDate,
    pub default_end_date: NaiveDate,
}

impl QueryConfig {
    pub fn default_range(&self) -> DateRange {
        DateRange::new(self.default_start_date, self.default_end_date)
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_start_date: ymd(2024, 1, 1),
            default_end_date: ymd(2024, 6, 12),
        }
    }
}

/// 文章归档分片布局，按起始日期升序排列
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    pub shards: Vec<ArchiveShard>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            shards: vec![
                ArchiveShard::new("archive-1", ymd(2024, 1, 1)),
                ArchiveShard::new("archive-2", ymd(2024, 3, 2)),
                ArchiveShard::new("archive-3", ymd(2024, 4, 27)),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// 默认日志级别过滤器，`RUST_LOG` 存在时以其为准
    pub level: String,
    /// 日志文件目录，为空时仅输出到标准输出
    pub dir: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

// 常量日期均为合法日历日期，`from_ymd_opt` 不会返回 None
fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}
