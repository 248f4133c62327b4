//! 表格读写
//!
//! - `reader` - 考生信息读取（calamine）
//! - `writer` - 成绩落盘（rust_xlsxwriter，逐条追加、中断安全）

pub mod reader;
pub mod writer;

pub use reader::load_students;
pub use writer::ScoreSink;
