//! 考生信息读取

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use tracing::info;

use crate::models::StudentRecord;

/// 从输入表格读取考生信息
///
/// 首行视为表头跳过。身份三列（考生号、准考证号、姓名）任一为空的行
/// 按空行跳过，只汇总计数不逐行告警。返回顺序即表格行序，也即处理顺序。
pub fn load_students(path: &Path, sheet: &str) -> Result<Vec<StudentRecord>> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("无法打开输入文件: {}", path.display()))?;
    let range = workbook
        .worksheet_range(sheet)
        .with_context(|| format!("无法读取工作表: {}", sheet))?;

    let mut students = Vec::new();
    let mut skipped = 0usize;
    for row in range.rows().skip(1) {
        let record = StudentRecord::new(
            &cell_text(row.first()),
            &cell_text(row.get(1)),
            &cell_text(row.get(2)),
        );
        if record.is_complete() {
            students.push(record);
        } else {
            skipped += 1;
        }
    }

    info!("成功读取 {} 条考生信息", students.len());
    if skipped > 0 {
        info!("跳过 {} 条身份信息不完整的空行", skipped);
    }
    Ok(students)
}

/// 单元格转文本
///
/// 考生号常被 Excel 存成数值，整数值的浮点单元格转回不带小数点的文本。
fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Float(f)) if f.fract() == 0.0 => format!("{}", *f as i64),
        Some(Data::Int(i)) => i.to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}
