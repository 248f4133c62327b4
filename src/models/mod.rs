//! 数据模型
//!
//! - `student` - 考生身份记录（输入表格三列）
//! - `schema` - 科目字段结构，表头 / 提取 / 行组装三处共用
//! - `extraction` - 提取结果与哨兵值

pub mod extraction;
pub mod schema;
pub mod student;

pub use extraction::{Extraction, FAILED, NOT_FOUND, TIMED_OUT};
pub use schema::{FieldKind, ScoreColumn, ScoreSchema, SubjectFields, TOTAL_LABEL};
pub use student::{StudentRecord, IDENTITY_LABELS};
