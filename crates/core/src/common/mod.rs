use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod time;

/// # Summary
/// 闭区间日期范围 `[start, end]`，用于所有按日期切片的查询。
///
/// # Invariants
/// - 两端均为包含边界。
/// - 允许 `start > end`，此时区间为空，不匹配任何日期。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    // 起始日期 (含)
    pub start: NaiveDate,
    // 结束日期 (含)
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// 不匹配任何日期的空区间。
    pub const fn empty() -> Self {
        Self {
            start: NaiveDate::MAX,
            end: NaiveDate::MIN,
        }
    }

    /// # Summary
    /// 从 `YYYY-MM-DD` 字符串对构造区间。
    ///
    /// # Arguments
    /// * `start`: 起始日期字符串。
    /// * `end`: 结束日期字符串。
    ///
    /// # Returns
    /// 任一端无法解析时返回 `chrono::ParseError`。
    pub fn parse(start: &str, end: &str) -> Result<Self, chrono::ParseError> {
        Ok(Self {
            start: time::parse_query_date(start)?,
            end: time::parse_query_date(end)?,
        })
    }

    /// 判断日期是否落在区间内 (含两端)。
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31));
        assert!(range.contains(d(2024, 1, 1)));
        assert!(range.contains(d(2024, 1, 31)));
        assert!(!range.contains(d(2023, 12, 31)));
        assert!(!range.contains(d(2024, 2, 1)));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let range = DateRange::new(d(2024, 2, 1), d(2024, 1, 1));
        assert!(range.is_empty());
        assert!(!range.contains(d(2024, 1, 15)));
        assert!(DateRange::empty().is_empty());
        assert!(!DateRange::empty().contains(d(2024, 1, 15)));
    }

    #[test]
    fn test_parse() {
        let range = DateRange::parse("2024-01-01", "2024-06-12").unwrap();
        assert_eq!(range, DateRange::new(d(2024, 1, 1), d(2024, 6, 12)));
        assert!(DateRange::parse("2024-13-01", "2024-06-12").is_err());
        assert!(DateRange::parse("2024-01-01", "yesterday").is_err());
    }
}
