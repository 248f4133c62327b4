//! 考生身份记录

use std::fmt;

/// 输出表头中的身份列名，顺序与输入表格一致
pub const IDENTITY_LABELS: [&str; 3] = ["考生号", "准考证号", "姓名"];

/// 一名考生的查询身份信息
///
/// 与输入表格前三列一一对应，构建时去除首尾空白。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    /// 考生号
    pub exam_no: String,
    /// 准考证号
    pub ticket_no: String,
    /// 姓名
    pub name: String,
}

impl StudentRecord {
    pub fn new(exam_no: &str, ticket_no: &str, name: &str) -> Self {
        Self {
            exam_no: exam_no.trim().to_string(),
            ticket_no: ticket_no.trim().to_string(),
            name: name.trim().to_string(),
        }
    }

    /// 三个身份字段是否都非空
    ///
    /// 任一为空的行按空行处理，不参与查询。
    pub fn is_complete(&self) -> bool {
        !self.exam_no.is_empty() && !self.ticket_no.is_empty() && !self.name.is_empty()
    }
}

impl fmt::Display for StudentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}（考生号：{}）", self.name, self.exam_no)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_whitespace() {
        let record = StudentRecord::new(" 2024001 ", "A1001", " 张三");
        assert_eq!(record.exam_no, "2024001");
        assert_eq!(record.ticket_no, "A1001");
        assert_eq!(record.name, "张三");
    }

    #[test]
    fn test_incomplete_when_any_identity_field_empty() {
        assert!(StudentRecord::new("2024001", "A1001", "张三").is_complete());
        assert!(!StudentRecord::new("", "A1001", "张三").is_complete());
        assert!(!StudentRecord::new("2024001", "", "张三").is_complete());
        assert!(!StudentRecord::new("2024001", "A1001", "").is_complete());
        assert!(!StudentRecord::new("   ", "A1001", "张三").is_complete());
    }
}
