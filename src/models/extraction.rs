//! 提取结果与哨兵值
//!
//! 每条记录的提取结果必须覆盖字段结构声明的全部列，缺失用哨兵值占位
//! 而不是省略，保证输出表格始终是矩形的。

use crate::models::schema::ScoreSchema;
use crate::models::student::StudentRecord;

/// 字段级哨兵：单元格定位不到或读取出错时填入该字段
pub const NOT_FOUND: &str = "未找到";
/// 记录级哨兵：表单元素未在限定时间内就绪时整行填入
pub const TIMED_OUT: &str = "超时";
/// 记录级哨兵：查询过程中发生其他故障时整行填入
pub const FAILED: &str = "失败";

/// 一条记录的成绩提取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// 与 `ScoreSchema::columns()` 一一对应的单元格文本
    pub cells: Vec<String>,
    /// 总分
    pub total: String,
}

impl Extraction {
    /// 全哨兵结果，超时 / 失败时整行占位
    pub fn filled(schema: &ScoreSchema, sentinel: &str) -> Self {
        Self {
            cells: vec![sentinel.to_string(); schema.column_count() - 1],
            total: sentinel.to_string(),
        }
    }

    /// 组装输出行：身份列 + 成绩列 + 总分，与表头严格同序
    pub fn into_row(self, record: &StudentRecord) -> Vec<String> {
        let mut row = Vec::with_capacity(3 + self.cells.len() + 1);
        row.push(record.exam_no.clone());
        row.push(record.ticket_no.clone());
        row.push(record.name.clone());
        row.extend(self.cells);
        row.push(self.total);
        row
    }
}
