use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use chrono::NaiveDate;
use stocksense_core::common::DateRange;
use stocksense_core::dataset::entity::{
    Company, DailyCompanyRecord, DailyStat, HeatmapCell, OhlcvPoint, SentimentPoint,
    SymbolSeries, TimeRange,
};
use stocksense_core::dataset::error::DatasetError;
use stocksense_core::dataset::port::DatasetPort;
use tracing::{debug, info};

use crate::loader;

/// # Summary
/// 合并数据表的不可变内存实现。
///
/// # Invariants
/// - 构造完成后不再修改，可通过 `Arc` 在任意多个请求之间共享，无需加锁。
/// - `companies` 保存 (公司, 代码) 首次出现的顺序。
/// - `span` 为全部记录的最小/最大日期，数据表为空时为 None。
pub struct InMemoryDataset {
    records: Vec<DailyCompanyRecord>,
    companies: Vec<Company>,
    span: Option<DateRange>,
    default_range: DateRange,
}

impl InMemoryDataset {
    /// # Summary
    /// 由已解析的记录构造内存表。
    ///
    /// # Logic
    /// 1. 按首次出现顺序收集去重后的 (公司, 代码)。
    /// 2. 计算全局最小/最大日期。
    ///
    /// # Arguments
    /// * `records` - 按文件顺序排列的记录。
    /// * `default_range` - 未指定区间时的默认查询区间。
    pub fn new(records: Vec<DailyCompanyRecord>, default_range: DateRange) -> Self {
        let mut seen = HashSet::new();
        let mut companies = Vec::new();
        for r in &records {
            if seen.insert((r.company.as_str(), r.symbol.as_str())) {
                companies.push(Company {
                    company: r.company.clone(),
                    symbol: r.symbol.clone(),
                });
            }
        }

        let span = records.iter().map(|r| r.date).fold(None::<DateRange>, |acc, date| {
            Some(match acc {
                None => DateRange::new(date, date),
                Some(span) => DateRange::new(span.start.min(date), span.end.max(date)),
            })
        });

        Self {
            records,
            companies,
            span,
            default_range,
        }
    }

    /// # Summary
    /// 从 CSV 文件加载并构造内存表，仅应在进程启动时调用一次。
    pub fn open(path: &Path, default_range: DateRange) -> Result<Self, DatasetError> {
        let dataset = Self::new(loader::load_from_path(path)?, default_range);
        match dataset.span {
            Some(span) => info!(
                "Dataset ready: {} rows, {} companies, {}",
                dataset.len(),
                dataset.companies.len(),
                span
            ),
            None => info!("Dataset ready: file contains no rows"),
        }
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 按代码和日期区间过滤，并按日期升序稳定排序
    fn symbol_rows(&self, symbol: &str, range: &DateRange) -> Vec<&DailyCompanyRecord> {
        let mut rows: Vec<&DailyCompanyRecord> = self
            .records
            .iter()
            .filter(|r| r.symbol == symbol && range.contains(r.date))
            .collect();
        rows.sort_by_key(|r| r.date);
        rows
    }

    fn symbol_series<'a, T>(
        &'a self,
        symbol: &str,
        range: &DateRange,
        project: impl Fn(&'a DailyCompanyRecord) -> T,
    ) -> Result<SymbolSeries<T>, DatasetError> {
        let rows = self.symbol_rows(symbol, range);
        let company = match rows.first() {
            Some(first) => first.company.clone(),
            None => {
                debug!("No rows for {} in {}", symbol, range);
                return Err(DatasetError::NotFound(format!(
                    "No data found for {} in the specified date range",
                    symbol
                )));
            }
        };
        Ok(SymbolSeries {
            company,
            symbol: symbol.to_string(),
            points: rows.into_iter().map(project).collect(),
        })
    }
}

impl DatasetPort for InMemoryDataset {
    fn default_range(&self) -> DateRange {
        self.default_range
    }

    fn companies(&self) -> Vec<Company> {
        self.companies.clone()
    }

    fn time_range(&self) -> Result<TimeRange, DatasetError> {
        let span = self
            .span
            .ok_or_else(|| DatasetError::NotFound("Dataset is empty".to_string()))?;
        Ok(TimeRange {
            start_date: span.start,
            end_date: span.end,
            default_start_date: self.default_range.start,
            default_end_date: self.default_range.end,
        })
    }

    fn ohlcv(
        &self,
        symbol: &str,
        range: &DateRange,
    ) -> Result<SymbolSeries<OhlcvPoint>, DatasetError> {
        self.symbol_series(symbol, range, OhlcvPoint::from)
    }

    fn sentiment(
        &self,
        symbol: &str,
        range: &DateRange,
    ) -> Result<SymbolSeries<SentimentPoint>, DatasetError> {
        self.symbol_series(symbol, range, SentimentPoint::from)
    }

    fn heatmap(&self, range: &DateRange) -> Result<Vec<HeatmapCell>, DatasetError> {
        let mut rows: Vec<&DailyCompanyRecord> = self
            .records
            .iter()
            .filter(|r| range.contains(r.date))
            .collect();
        if rows.is_empty() {
            debug!("No heatmap rows in {}", range);
            return Err(DatasetError::NotFound(
                "No data found in the specified date range".to_string(),
            ));
        }
        rows.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.company.cmp(&b.company)));
        Ok(rows.into_iter().map(HeatmapCell::from).collect())
    }

    fn daily_stats(&self, range: &DateRange) -> Vec<DailyStat> {
        // 日期 -> (文章总数, 情绪分之和, 有情绪分的行数)
        let mut days: BTreeMap<NaiveDate, (u64, f64, u32)> = BTreeMap::new();
        for r in self.records.iter().filter(|r| range.contains(r.date)) {
            let entry = days.entry(r.date).or_insert((0, 0.0, 0));
            entry.0 += r.article_count;
            if let Some(sentiment) = r.avg_sentiment {
                entry.1 += sentiment;
                entry.2 += 1;
            }
        }
        days.into_iter()
            .map(|(date, (article_count, sentiment_sum, scored))| DailyStat {
                date,
                article_count,
                avg_sentiment: (scored > 0).then(|| sentiment_sum / f64::from(scored)),
            })
            .collect()
    }
}
