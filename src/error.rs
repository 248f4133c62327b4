//! 错误类型定义
//!
//! 查询链路与输出链路各用一套枚举：
//! - `QueryError` 区分「超时」与「失败」，决定该考生整行写入哪种哨兵值
//! - `SinkError` 覆盖输出文件的读写故障，供落盘层触发备用路径切换

use std::path::PathBuf;

use thiserror::Error;

/// 查询链路错误
///
/// 单个字段定位不到不会产生本错误（字段级缺失由提取器就地替换哨兵值），
/// 本错误只描述整条查询动作的故障。
#[derive(Debug, Error)]
pub enum QueryError {
    /// 页面元素在限定时间内未达到要求状态
    #[error("等待元素超时: {0}")]
    Timeout(String),
    /// 其他查询故障（网络中断、页面结构变化、脚本执行失败等）
    #[error("查询失败: {0}")]
    Failed(String),
}

impl QueryError {
    /// 是否为超时类错误
    pub fn is_timeout(&self) -> bool {
        matches!(self, QueryError::Timeout(_))
    }
}

impl From<chromiumoxide::error::CdpError> for QueryError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        QueryError::Failed(err.to_string())
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        QueryError::Failed(format!("解析脚本返回值失败: {}", err))
    }
}

/// 输出链路错误
#[derive(Debug, Error)]
pub enum SinkError {
    /// 读取已有输出文件失败（文件损坏、被占用等）
    #[error("读取输出文件失败 ({}): {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },
    /// 写入输出文件失败（路径被锁定、磁盘故障等）
    #[error("写入输出文件失败 ({}): {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 组装工作簿失败
    #[error("生成工作簿失败: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
    /// 已有输出文件的表头与当前科目配置不一致
    ///
    /// 表头、提取、行组装三者必须严格同序，否则列会静默错位，
    /// 因此宁可报错也不向不匹配的表头追加数据。
    #[error("输出文件表头与当前科目配置不一致: {}", .path.display())]
    HeaderMismatch { path: PathBuf },
    /// 待写入的行宽与表头列数不一致
    #[error("行宽与表头不一致: 预期 {expected} 列, 实际 {got} 列")]
    RowShape { expected: usize, got: usize },
}
