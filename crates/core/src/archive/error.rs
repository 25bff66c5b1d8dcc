use thiserror::Error;

/// # Summary
/// 归档分片布局错误，仅在启动校验配置时出现。
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShardError {
    // 未配置任何分片
    #[error("Shard layout is empty")]
    Empty,
    // 分片起始日期未严格递增
    #[error("Shard `{name}` starts on {starts_on}, which is not after the previous shard")]
    NotIncreasing {
        name: String,
        starts_on: chrono::NaiveDate,
    },
}
