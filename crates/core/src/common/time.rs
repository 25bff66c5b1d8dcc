use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// 查询参数中使用的日期格式。
pub const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

/// # Summary
/// 解析查询参数中的 `YYYY-MM-DD` 日期。
pub fn parse_query_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), QUERY_DATE_FORMAT)
}

/// # Summary
/// 宽松解析数据文件中的日期单元格，仅保留日历日期部分。
///
/// # Logic
/// 依次尝试以下格式，第一个成功者胜出:
/// 1. `YYYY-MM-DD`
/// 2. `YYYY-MM-DD HH:MM:SS` 或 `YYYY-MM-DDTHH:MM:SS`
/// 3. RFC 3339 (带时区偏移)
///
/// # Returns
/// 所有格式均失败时返回 None。
pub fn parse_record_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, QUERY_DATE_FORMAT) {
        return Some(date);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert_eq!(parse_record_date("2024-03-02"), Some(expected));
        assert_eq!(parse_record_date("2024-03-02 00:00:00"), Some(expected));
        assert_eq!(parse_record_date("2024-03-02T15:30:00"), Some(expected));
        assert_eq!(parse_record_date("2024-03-02T15:30:00+00:00"), Some(expected));
        assert_eq!(parse_record_date(" 2024-03-02 "), Some(expected));
        assert_eq!(parse_record_date("03/02/2024"), None);
        assert_eq!(parse_record_date(""), None);
    }

    #[test]
    fn test_parse_query_date_rejects_garbage() {
        assert!(parse_query_date("2024-06-12").is_ok());
        assert!(parse_query_date("2024/06/12").is_err());
        assert!(parse_query_date("").is_err());
    }
}
