//! 记录处理上下文
//!
//! 封装「正在处理第几条、共几条」，作为日志前缀贯穿单条记录的处理过程。

use std::fmt;

/// 单条记录的处理上下文
#[derive(Debug, Clone, Copy)]
pub struct RecordCtx {
    /// 当前序号，从 1 开始
    pub index: usize,
    /// 记录总数
    pub total: usize,
}

impl RecordCtx {
    pub fn new(index: usize, total: usize) -> Self {
        Self { index, total }
    }
}

impl fmt::Display for RecordCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[考生 {}/{}]", self.index, self.total)
    }
}
