use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// # Summary
/// 每日公司记录，合并后数据表中的一行，以 (date, symbol) 为逻辑键。
///
/// # Invariants
/// - `date` 已解析为日历日期，按日期比较而非原始字符串。
/// - (date, symbol) 不强制唯一，重复行会被原样保留。
/// - `article_count` 非负。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCompanyRecord {
    // 交易日
    pub date: NaiveDate,
    // 公司展示名称
    pub company: String,
    // 股票代码
    pub symbol: String,
    // 开盘价
    pub open: f64,
    // 最高价
    pub high: f64,
    // 最低价
    pub low: f64,
    // 收盘价
    pub close: f64,
    // 成交量
    pub volume: u64,
    // 当日新闻平均情绪分，通常位于 [-1, 1]；无新闻的日期为 None
    pub avg_sentiment: Option<f64>,
    // 当日相关新闻篇数
    pub article_count: u64,
}

/// 公司与代码的去重组合。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Company {
    pub company: String,
    pub symbol: String,
}

/// # Summary
/// 数据表覆盖的全局日期范围，以及默认查询区间。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub default_start_date: NaiveDate,
    pub default_end_date: NaiveDate,
}

/// 单日 K 线点。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcvPoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// 单日情绪点。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentPoint {
    pub date: NaiveDate,
    pub avg_sentiment: Option<f64>,
    pub article_count: u64,
}

/// # Summary
/// 某个公司在某日的情绪切片，作为跨公司热力图的一个格子。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub company: String,
    pub avg_sentiment: Option<f64>,
    pub article_count: u64,
}

/// # Summary
/// 单日全市场汇总。
///
/// # Invariants
/// - `article_count` 为当日所有行的求和。
/// - `avg_sentiment` 为当日有情绪分的行的算术平均，不按文章数加权；
///   缺失情绪分的行不参与计算，当日全部缺失时为 None。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub article_count: u64,
    pub avg_sentiment: Option<f64>,
}

/// # Summary
/// 按代码查询得到的时间序列切片。
///
/// # Invariants
/// - `points` 按日期升序且非空。
/// - `company` 取排序后第一行的公司名称。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolSeries<T> {
    pub company: String,
    pub symbol: String,
    pub points: Vec<T>,
}

impl From<&DailyCompanyRecord> for OhlcvPoint {
    fn from(r: &DailyCompanyRecord) -> Self {
        Self {
            date: r.date,
            open: r.open,
            high: r.high,
            low: r.low,
            close: r.close,
            volume: r.volume,
        }
    }
}

impl From<&DailyCompanyRecord> for SentimentPoint {
    fn from(r: &DailyCompanyRecord) -> Self {
        Self {
            date: r.date,
            avg_sentiment: r.avg_sentiment,
            article_count: r.article_count,
        }
    }
}

impl From<&DailyCompanyRecord> for HeatmapCell {
    fn from(r: &DailyCompanyRecord) -> Self {
        Self {
            date: r.date,
            company: r.company.clone(),
            avg_sentiment: r.avg_sentiment,
            article_count: r.article_count,
        }
    }
}
