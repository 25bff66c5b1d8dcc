//! # DTO (Data Transfer Object) 层
//!
//! 将内部领域模型转化为面向前端 JSON 输出的固定结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。
//! 日期统一序列化为 `YYYY-MM-DD`。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use stocksense_core::common::DateRange;
use stocksense_core::common::time::parse_query_date;
use stocksense_core::dataset::entity::{
    Company, DailyStat, HeatmapCell, OhlcvPoint, SentimentPoint, SymbolSeries, TimeRange,
};

// ============================================================
//  通用
// ============================================================

/// 错误响应体，字段名与既有前端约定保持一致
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 错误描述信息
    #[schema(example = "No data found for ZZZZ in the specified date range")]
    pub detail: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self { detail: msg.into() }
    }
}

/// 欢迎信息
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Welcome to Stock Analysis API")]
    pub message: String,
}

/// 日期区间查询参数，两端均可省略，省略时使用默认区间
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    /// 起始日期 (含)，YYYY-MM-DD
    #[param(example = "2024-01-01")]
    pub start_date: Option<String>,
    /// 结束日期 (含)，YYYY-MM-DD
    #[param(example = "2024-06-12")]
    pub end_date: Option<String>,
}

impl DateRangeQuery {
    /// # Summary
    /// 将查询参数解析为闭区间。
    ///
    /// # Logic
    /// 1. 缺省的一端取 `defaults` 对应端点。
    /// 2. 任一端无法解析时返回空区间，使查询自然落入"无数据"分支，
    ///    不单独产生参数校验错误。
    pub fn resolve(&self, defaults: DateRange) -> DateRange {
        let parse = |raw: &Option<String>, fallback: NaiveDate| match raw {
            Some(s) => parse_query_date(s).map_err(|e| {
                tracing::debug!("Ignoring malformed date `{}`: {}", s, e);
            }),
            None => Ok(fallback),
        };
        match (
            parse(&self.start_date, defaults.start),
            parse(&self.end_date, defaults.end),
        ) {
            (Ok(start), Ok(end)) => DateRange::new(start, end),
            _ => DateRange::empty(),
        }
    }
}

// ============================================================
//  目录相关 DTO
// ============================================================

/// 公司 DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CompanyResponse {
    /// 公司名称
    #[schema(example = "Apple")]
    pub company: String,
    /// 股票代码
    #[schema(example = "AAPL")]
    pub symbol: String,
}

impl From<Company> for CompanyResponse {
    fn from(c: Company) -> Self {
        Self {
            company: c.company,
            symbol: c.symbol,
        }
    }
}

/// 公司列表
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompaniesResponse {
    pub companies: Vec<CompanyResponse>,
}

/// 数据覆盖区间与默认查询区间
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimeRangeResponse {
    #[schema(example = "2024-01-01")]
    pub start_date: NaiveDate,
    #[schema(example = "2024-06-30")]
    pub end_date: NaiveDate,
    #[schema(example = "2024-01-01")]
    pub default_start_date: NaiveDate,
    #[schema(example = "2024-06-12")]
    pub default_end_date: NaiveDate,
}

impl From<TimeRange> for TimeRangeResponse {
    fn from(t: TimeRange) -> Self {
        Self {
            start_date: t.start_date,
            end_date: t.end_date,
            default_start_date: t.default_start_date,
            default_end_date: t.default_end_date,
        }
    }
}

// ============================================================
//  行情相关 DTO
// ============================================================

/// 单日 OHLCV DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OhlcvPointResponse {
    #[schema(example = "2024-01-02")]
    pub date: NaiveDate,
    #[schema(example = 187.15)]
    pub open: f64,
    #[schema(example = 188.44)]
    pub high: f64,
    #[schema(example = 183.89)]
    pub low: f64,
    #[schema(example = 185.64)]
    pub close: f64,
    #[schema(example = 82488700)]
    pub volume: u64,
}

impl From<OhlcvPoint> for OhlcvPointResponse {
    fn from(p: OhlcvPoint) -> Self {
        Self {
            date: p.date,
            open: p.open,
            high: p.high,
            low: p.low,
            close: p.close,
            volume: p.volume,
        }
    }
}

/// 单只股票 OHLCV 序列
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OhlcvResponse {
    #[schema(example = "Apple")]
    pub company: String,
    #[schema(example = "AAPL")]
    pub symbol: String,
    pub data: Vec<OhlcvPointResponse>,
}

impl From<SymbolSeries<OhlcvPoint>> for OhlcvResponse {
    fn from(s: SymbolSeries<OhlcvPoint>) -> Self {
        Self {
            company: s.company,
            symbol: s.symbol,
            data: s.points.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================
//  舆情相关 DTO
// ============================================================

/// 单日情绪 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SentimentPointResponse {
    #[schema(example = "2024-01-02")]
    pub date: NaiveDate,
    /// 当日无新闻时为 null
    #[schema(example = 0.12)]
    pub avg_sentiment: Option<f64>,
    #[schema(example = 14)]
    pub article_count: u64,
}

impl From<SentimentPoint> for SentimentPointResponse {
    fn from(p: SentimentPoint) -> Self {
        Self {
            date: p.date,
            avg_sentiment: p.avg_sentiment,
            article_count: p.article_count,
        }
    }
}

/// 单只股票情绪序列
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SentimentResponse {
    #[schema(example = "Tesla")]
    pub company: String,
    #[schema(example = "TSLA")]
    pub symbol: String,
    pub data: Vec<SentimentPointResponse>,
}

impl From<SymbolSeries<SentimentPoint>> for SentimentResponse {
    fn from(s: SymbolSeries<SentimentPoint>) -> Self {
        Self {
            company: s.company,
            symbol: s.symbol,
            data: s.points.into_iter().map(Into::into).collect(),
        }
    }
}

/// 热力图格子 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HeatmapCellResponse {
    #[schema(example = "2024-01-02")]
    pub date: NaiveDate,
    #[schema(example = "Nvidia")]
    pub company: String,
    /// 当日无新闻时为 null
    #[schema(example = 0.31)]
    pub avg_sentiment: Option<f64>,
    #[schema(example = 7)]
    pub article_count: u64,
}

impl From<HeatmapCell> for HeatmapCellResponse {
    fn from(c: HeatmapCell) -> Self {
        Self {
            date: c.date,
            company: c.company,
            avg_sentiment: c.avg_sentiment,
            article_count: c.article_count,
        }
    }
}

/// 跨公司热力图
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HeatmapResponse {
    pub data: Vec<HeatmapCellResponse>,
}

/// 每日汇总 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyStatResponse {
    #[schema(example = "2024-01-02")]
    pub date: NaiveDate,
    /// 当日所有公司文章数之和
    #[schema(example = 42)]
    pub article_count: u64,
    /// 当日有情绪分的公司的算术平均 (不按文章数加权)，全部缺失时为 null
    #[schema(example = 0.08)]
    pub avg_sentiment: Option<f64>,
}

impl From<DailyStat> for DailyStatResponse {
    fn from(s: DailyStat) -> Self {
        Self {
            date: s.date,
            article_count: s.article_count,
            avg_sentiment: s.avg_sentiment,
        }
    }
}

/// 每日汇总列表
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyStatsResponse {
    pub data: Vec<DailyStatResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn defaults() -> DateRange {
        DateRange::new(d(2024, 1, 1), d(2024, 6, 12))
    }

    #[test]
    fn test_resolve_defaults_each_side() {
        assert_eq!(DateRangeQuery::default().resolve(defaults()), defaults());

        let query = DateRangeQuery {
            start_date: Some("2024-03-01".into()),
            end_date: None,
        };
        assert_eq!(
            query.resolve(defaults()),
            DateRange::new(d(2024, 3, 1), d(2024, 6, 12))
        );
    }

    #[test]
    fn test_resolve_malformed_date_matches_nothing() {
        let query = DateRangeQuery {
            start_date: Some("2024-01-01".into()),
            end_date: Some("June 12".into()),
        };
        assert!(query.resolve(defaults()).is_empty());
    }

    #[test]
    fn test_row_dates_serialize_as_plain_dates() {
        let row = DailyStatResponse {
            date: d(2024, 1, 2),
            article_count: 8,
            avg_sentiment: Some(0.3),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["date"], "2024-01-02");
        assert_eq!(json["article_count"], 8);
    }

    #[test]
    fn test_missing_sentiment_serializes_as_null() {
        let row = DailyStatResponse {
            date: d(2024, 1, 3),
            article_count: 0,
            avg_sentiment: None,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert!(json["avg_sentiment"].is_null());
    }
}
