use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ShardError;
use crate::common::DateRange;

/// # Summary
/// 文章归档分片描述。每个分片保存从 `starts_on` 起、直到下一个分片开始前一天的文章。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveShard {
    // 分片名称，用于日志与连接配置查找
    pub name: String,
    // 分片覆盖的首日 (含)
    pub starts_on: NaiveDate,
}

impl ArchiveShard {
    pub fn new(name: impl Into<String>, starts_on: NaiveDate) -> Self {
        Self {
            name: name.into(),
            starts_on,
        }
    }
}

/// # Summary
/// 基于日期边界的分片路由器。
///
/// # Invariants
/// - 至少包含一个分片。
/// - 分片按 `starts_on` 严格递增排列。
/// - 早于所有边界的日期落入第一个分片。
#[derive(Debug, Clone)]
pub struct ShardRouter {
    shards: Vec<ArchiveShard>,
}

impl ShardRouter {
    /// # Summary
    /// 校验并构造路由器。
    ///
    /// # Returns
    /// 分片为空或起始日期未严格递增时返回 `ShardError`。
    pub fn new(shards: Vec<ArchiveShard>) -> Result<Self, ShardError> {
        if shards.is_empty() {
            return Err(ShardError::Empty);
        }
        for pair in shards.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.starts_on <= prev.starts_on {
                return Err(ShardError::NotIncreasing {
                    name: next.name.clone(),
                    starts_on: next.starts_on,
                });
            }
        }
        Ok(Self { shards })
    }

    pub fn shards(&self) -> &[ArchiveShard] {
        &self.shards
    }

    fn index_for(&self, date: NaiveDate) -> usize {
        // 第一个 starts_on > date 的位置减一即为目标分片
        self.shards
            .partition_point(|s| s.starts_on <= date)
            .saturating_sub(1)
    }

    /// # Summary
    /// 返回保存指定日期文章的分片。
    pub fn route(&self, date: NaiveDate) -> &ArchiveShard {
        &self.shards[self.index_for(date)]
    }

    /// # Summary
    /// 将闭区间拆分为按分片划分的连续子区间。
    ///
    /// # Logic
    /// 1. 从区间起点所在分片开始，子区间终点取下一个分片起始日的前一天与区间终点中的较小者。
    /// 2. 依次推进直到覆盖区间终点。
    ///
    /// # Returns
    /// 按时间顺序排列的 (分片, 子区间) 列表；空区间返回空列表。
    pub fn split(&self, range: &DateRange) -> Vec<(&ArchiveShard, DateRange)> {
        let mut parts = Vec::new();
        if range.is_empty() {
            return parts;
        }

        let mut cursor = range.start;
        let mut idx = self.index_for(cursor);
        loop {
            let shard_end = self
                .shards
                .get(idx + 1)
                .and_then(|next| next.starts_on.pred_opt())
                .unwrap_or(NaiveDate::MAX);
            let end = shard_end.min(range.end);
            parts.push((&self.shards[idx], DateRange::new(cursor, end)));

            match end.succ_opt() {
                Some(next) if end < range.end => {
                    cursor = next;
                    idx += 1;
                }
                _ => break,
            }
        }
        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn default_router() -> ShardRouter {
        ShardRouter::new(vec![
            ArchiveShard::new("archive-1", d(2024, 1, 1)),
            ArchiveShard::new("archive-2", d(2024, 3, 2)),
            ArchiveShard::new("archive-3", d(2024, 4, 27)),
        ])
        .unwrap()
    }

    #[test]
    fn test_route_boundaries() {
        let router = default_router();
        assert_eq!(router.route(d(2023, 12, 31)).name, "archive-1");
        assert_eq!(router.route(d(2024, 1, 1)).name, "archive-1");
        assert_eq!(router.route(d(2024, 3, 1)).name, "archive-1");
        assert_eq!(router.route(d(2024, 3, 2)).name, "archive-2");
        assert_eq!(router.route(d(2024, 4, 26)).name, "archive-2");
        assert_eq!(router.route(d(2024, 4, 27)).name, "archive-3");
        assert_eq!(router.route(d(2030, 1, 1)).name, "archive-3");
    }

    #[test]
    fn test_split_across_all_shards() {
        let router = default_router();
        let parts = router.split(&DateRange::new(d(2024, 2, 28), d(2024, 5, 1)));
        let names: Vec<&str> = parts.iter().map(|(s, _)| s.name.as_str()).collect();
        assert_eq!(names, vec!["archive-1", "archive-2", "archive-3"]);
        assert_eq!(parts[0].1, DateRange::new(d(2024, 2, 28), d(2024, 3, 1)));
        assert_eq!(parts[1].1, DateRange::new(d(2024, 3, 2), d(2024, 4, 26)));
        assert_eq!(parts[2].1, DateRange::new(d(2024, 4, 27), d(2024, 5, 1)));
    }

    #[test]
    fn test_split_within_one_shard() {
        let router = default_router();
        let range = DateRange::new(d(2024, 3, 5), d(2024, 3, 9));
        let parts = router.split(&range);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].0.name, "archive-2");
        assert_eq!(parts[0].1, range);
    }

    #[test]
    fn test_split_single_day_on_boundary() {
        let router = default_router();
        let range = DateRange::new(d(2024, 4, 27), d(2024, 4, 27));
        let parts = router.split(&range);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].0.name, "archive-3");
    }

    #[test]
    fn test_split_empty_range() {
        let router = default_router();
        assert!(router.split(&DateRange::new(d(2024, 5, 1), d(2024, 4, 1))).is_empty());
    }

    #[test]
    fn test_invalid_layouts() {
        assert_eq!(ShardRouter::new(vec![]).unwrap_err(), ShardError::Empty);
        let err = ShardRouter::new(vec![
            ArchiveShard::new("a", d(2024, 3, 2)),
            ArchiveShard::new("b", d(2024, 3, 2)),
        ])
        .unwrap_err();
        assert!(matches!(err, ShardError::NotIncreasing { ref name, .. } if name == "b"));
    }
}
