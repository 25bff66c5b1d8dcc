use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use stocksense_core::common::time::parse_record_date;
use stocksense_core::dataset::entity::DailyCompanyRecord;
use stocksense_core::dataset::error::DatasetError;
use tracing::{debug, info};

/// 数据文件必须包含的列，顺序不限，多余列会被忽略。
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "date",
    "company",
    "symbol",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "avg_sentiment",
    "article_count",
];

/// 各必需列在表头中的位置
struct Columns {
    date: usize,
    company: usize,
    symbol: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
    avg_sentiment: usize,
    article_count: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, DatasetError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DatasetError::Csv(format!("missing required column `{}`", name)))
        };
        Ok(Self {
            date: find("date")?,
            company: find("company")?,
            symbol: find("symbol")?,
            open: find("open")?,
            high: find("high")?,
            low: find("low")?,
            close: find("close")?,
            volume: find("volume")?,
            avg_sentiment: find("avg_sentiment")?,
            article_count: find("article_count")?,
        })
    }
}

/// # Summary
/// 从磁盘读取合并后的 CSV 数据文件。
///
/// # Logic
/// 1. 打开文件，失败时返回 `DatasetError::Io`。
/// 2. 委托 [`load_from_reader`] 完成解析。
///
/// # Arguments
/// * `path` - 数据文件路径。
///
/// # Returns
/// 按文件顺序排列的记录列表。
pub fn load_from_path(path: &Path) -> Result<Vec<DailyCompanyRecord>, DatasetError> {
    info!("Loading dataset from {}", path.display());
    let file = File::open(path)?;
    let records = load_from_reader(file)?;
    info!("Loaded {} rows from {}", records.len(), path.display());
    Ok(records)
}

/// # Summary
/// 从任意字节流解析 CSV 数据。
///
/// # Logic
/// 1. 读取表头并定位全部必需列，缺列直接失败。
/// 2. 逐行解析，任一单元格非法即失败，错误中携带行号与列名。
///
/// # Returns
/// 按输入顺序排列的记录列表；只有表头的文件返回空列表。
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<DailyCompanyRecord>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| DatasetError::Csv(format!("failed to read header: {}", e)))?
        .clone();
    let columns = Columns::locate(&headers)?;
    debug!("Dataset header: {:?}", headers);

    let mut records = Vec::new();
    let mut raw = StringRecord::new();
    while reader
        .read_record(&mut raw)
        .map_err(|e| DatasetError::Csv(e.to_string()))?
    {
        let line = raw.position().map(|p| p.line()).unwrap_or_default();
        records.push(parse_record(&raw, &columns, line)?);
    }
    Ok(records)
}

fn parse_record(
    raw: &StringRecord,
    columns: &Columns,
    line: u64,
) -> Result<DailyCompanyRecord, DatasetError> {
    let cell = |idx: usize| raw.get(idx).unwrap_or_default();
    let parse_error = |column: &'static str, message: String| DatasetError::Parse {
        line,
        column,
        message,
    };

    let date_cell = cell(columns.date);
    let date = parse_record_date(date_cell)
        .ok_or_else(|| parse_error("date", format!("unrecognized date `{}`", date_cell)))?;

    let symbol = cell(columns.symbol);
    if symbol.is_empty() {
        return Err(parse_error("symbol", "empty symbol".to_string()));
    }

    let price = |idx: usize, column: &'static str| {
        parse_float(cell(idx)).map_err(|message| parse_error(column, message))
    };

    // 无新闻的日期在合并阶段留空：情绪分记为缺失，文章数按 0 处理
    let avg_sentiment = match cell(columns.avg_sentiment) {
        "" => None,
        s => Some(
            parse_float(s).map_err(|message| parse_error("avg_sentiment", message))?,
        ),
    };
    let article_count = match cell(columns.article_count) {
        "" => 0,
        s => parse_count(s).map_err(|message| parse_error("article_count", message))?,
    };

    Ok(DailyCompanyRecord {
        date,
        company: cell(columns.company).to_string(),
        symbol: symbol.to_string(),
        open: price(columns.open, "open")?,
        high: price(columns.high, "high")?,
        low: price(columns.low, "low")?,
        close: price(columns.close, "close")?,
        volume: parse_count(cell(columns.volume))
            .map_err(|message| parse_error("volume", message))?,
        avg_sentiment,
        article_count,
    })
}

fn parse_float(s: &str) -> Result<f64, String> {
    s.parse::<f64>()
        .map_err(|e| format!("invalid number `{}`: {}", s, e))
}

/// # Summary
/// 解析非负整数单元格。
///
/// # Logic
/// 接受 `1200` 与 `1200.0` 两种写法 (上游以浮点列写出含缺失值的整数列)，
/// 小数部分必须全为 0。
fn parse_count(s: &str) -> Result<u64, String> {
    let integral = match s.split_once('.') {
        Some((int, frac)) if frac.chars().all(|c| c == '0') => int,
        Some(_) => return Err(format!("expected a whole number, got `{}`", s)),
        None => s,
    };
    integral
        .parse::<u64>()
        .map_err(|e| format!("invalid count `{}`: {}", s, e))
}
