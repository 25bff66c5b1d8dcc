use thiserror::Error;

/// # Summary
/// 数据集域错误枚举，覆盖启动加载失败与查询结果为空两类场景。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 加载类错误 (`Io`/`Csv`/`Parse`) 只会在启动阶段出现。
#[derive(Error, Debug)]
pub enum DatasetError {
    /// 数据文件无法打开或读取
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV 结构错误，如表头缺列或行宽不一致
    #[error("CSV error: {0}")]
    Csv(String),
    /// 单元格内容无法解析
    #[error("Parse error at line {line}, column `{column}`: {message}")]
    Parse {
        line: u64,
        column: &'static str,
        message: String,
    },
    /// 过滤后结果为空
    #[error("{0}")]
    NotFound(String),
}
