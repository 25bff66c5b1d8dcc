use super::entity::{
    Company, DailyStat, HeatmapCell, OhlcvPoint, SentimentPoint, SymbolSeries, TimeRange,
};
use super::error::DatasetError;
use crate::common::DateRange;

/// # Summary
/// 合并数据表的只读查询端口。API 层只依赖此抽象，由启动容器注入具体实现。
///
/// # Invariants
/// - 所有方法均为纯读操作，不修改任何状态，可被任意多个线程并发调用。
/// - 方法内部不做 I/O，只扫描进程启动时加载完成的内存表。
/// - 日期区间均为闭区间。
pub trait DatasetPort: Send + Sync {
    /// 未指定区间时使用的默认查询区间。
    fn default_range(&self) -> DateRange;

    /// # Summary
    /// 列出去重后的 (公司, 代码) 组合。
    ///
    /// # Returns
    /// 按在数据表中首次出现的顺序返回；仅当数据表为空时为空列表。
    fn companies(&self) -> Vec<Company>;

    /// # Summary
    /// 获取数据表覆盖的最小/最大日期，以及默认查询区间。
    ///
    /// # Returns
    /// 数据表为空时返回 `DatasetError::NotFound`。
    fn time_range(&self) -> Result<TimeRange, DatasetError>;

    /// # Summary
    /// 获取某只股票在区间内的 OHLCV 序列。
    ///
    /// # Logic
    /// 1. 过滤 `symbol` 精确匹配且日期落在区间内的行。
    /// 2. 按日期升序稳定排序。
    ///
    /// # Returns
    /// 结果为空时返回 `DatasetError::NotFound`。
    fn ohlcv(
        &self,
        symbol: &str,
        range: &DateRange,
    ) -> Result<SymbolSeries<OhlcvPoint>, DatasetError>;

    /// # Summary
    /// 获取某只股票在区间内的情绪序列，过滤与排序规则同 [`DatasetPort::ohlcv`]。
    fn sentiment(
        &self,
        symbol: &str,
        range: &DateRange,
    ) -> Result<SymbolSeries<SentimentPoint>, DatasetError>;

    /// # Summary
    /// 获取区间内所有公司的情绪格子。
    ///
    /// # Logic
    /// 按 (日期升序, 公司名字典序升序) 稳定排序。
    ///
    /// # Returns
    /// 结果为空时返回 `DatasetError::NotFound`。
    fn heatmap(&self, range: &DateRange) -> Result<Vec<HeatmapCell>, DatasetError>;

    /// # Summary
    /// 按日汇总区间内所有公司的文章数与平均情绪。
    ///
    /// # Returns
    /// 每个出现过的日期一行，按日期升序。区间内无数据时返回空列表而非错误，
    /// 与其它切片查询的行为不对称，保留该行为以兼容现有前端。
    fn daily_stats(&self, range: &DateRange) -> Vec<DailyStat>;
}
