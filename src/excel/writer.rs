//! 成绩落盘
//!
//! xlsx 无法原地追加，每次写入都整表重写：读出已有行，连同新行写入
//! 同目录临时文件后原子改名覆盖。任意时刻中断，输出文件都保持完整
//! 可打开，最多丢失正在写入的一条。

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use tracing::{info, warn};

use crate::error::SinkError;
use crate::models::{ScoreSchema, IDENTITY_LABELS};

/// 备用输出文件的文件名后缀
const FALLBACK_SUFFIX: &str = "_备用";

/// 成绩输出文件
///
/// 持有当前生效的输出路径：主路径读写故障时一次性切换到备用路径，
/// 本次运行不再切回。
pub struct ScoreSink {
    path: PathBuf,
    sheet: String,
    header: Vec<String>,
    on_fallback: bool,
}

impl ScoreSink {
    /// 打开（或创建）输出文件
    ///
    /// 文件不存在时写入表头；已存在时不动内容，只核对表头与当前科目
    /// 配置一致。不一致直接报错，绝不向错位的表头追加数据。
    pub fn create(path: &Path, sheet: &str, schema: &ScoreSchema) -> Result<Self, SinkError> {
        let mut sink = Self {
            path: path.to_path_buf(),
            sheet: sheet.to_string(),
            header: build_header(schema),
            on_fallback: false,
        };
        if let Err(e) = sink.ensure_initialized() {
            if !sink.switch_to_fallback(&e) {
                return Err(e);
            }
            sink.ensure_initialized()?;
        }
        Ok(sink)
    }

    /// 当前生效的输出路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 追加一行并立即落盘
    ///
    /// 行宽必须与表头一致。每次调用独立完成读取、重写、改名，
    /// 两次调用之间进程随时可以被终止。
    pub fn append_row(&mut self, row: &[String]) -> Result<(), SinkError> {
        if row.len() != self.header.len() {
            return Err(SinkError::RowShape {
                expected: self.header.len(),
                got: row.len(),
            });
        }
        if let Err(e) = self.append_at_current(row) {
            if !self.switch_to_fallback(&e) {
                return Err(e);
            }
            self.ensure_initialized()?;
            self.append_at_current(row)?;
        }
        Ok(())
    }

    /// 输出文件中已有结果的考生号集合（续跑模式用）
    pub fn existing_exam_numbers(&self) -> Result<HashSet<String>, SinkError> {
        let rows = read_rows(&self.path, &self.sheet)?;
        Ok(rows
            .into_iter()
            .skip(1)
            .filter_map(|row| row.into_iter().next())
            .filter(|exam_no| !exam_no.is_empty())
            .collect())
    }

    fn ensure_initialized(&self) -> Result<(), SinkError> {
        if self.path.exists() {
            let rows = read_rows(&self.path, &self.sheet)?;
            match rows.first() {
                Some(first) if *first == self.header => Ok(()),
                _ => Err(SinkError::HeaderMismatch {
                    path: self.path.clone(),
                }),
            }
        } else {
            write_rows(&self.path, &self.sheet, std::iter::once(self.header.as_slice()))?;
            info!("已创建输出文件：{}", self.path.display());
            Ok(())
        }
    }

    fn append_at_current(&self, row: &[String]) -> Result<(), SinkError> {
        let mut rows = read_rows(&self.path, &self.sheet)?;
        rows.push(row.to_vec());
        write_rows(&self.path, &self.sheet, rows.iter().map(|r| r.as_slice()))
    }

    /// 主路径故障时切换到备用路径，每次运行至多切换一次
    ///
    /// 只有读写类故障触发切换；表头不一致、行宽不一致是配置问题，
    /// 换路径解决不了，直接向上传播。
    fn switch_to_fallback(&mut self, cause: &SinkError) -> bool {
        if self.on_fallback
            || !matches!(cause, SinkError::Read { .. } | SinkError::Write { .. })
        {
            return false;
        }
        let fallback = fallback_path(&self.path);
        warn!(
            "⚠️ 输出文件不可用（{}），改用备用文件：{}",
            cause,
            fallback.display()
        );
        self.path = fallback;
        self.on_fallback = true;
        true
    }
}

/// 表头：身份列 + 科目列展开 + 总分
fn build_header(schema: &ScoreSchema) -> Vec<String> {
    let mut header: Vec<String> = IDENTITY_LABELS.iter().map(|s| s.to_string()).collect();
    header.extend(schema.column_labels());
    header
}

/// 备用路径：主文件名加「_备用」后缀
fn fallback_path(path: &Path) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("成绩结果");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("xlsx");
    path.with_file_name(format!("{}{}.{}", stem, FALLBACK_SUFFIX, ext))
}

fn read_rows(path: &Path, sheet: &str) -> Result<Vec<Vec<String>>, SinkError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| SinkError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let range = workbook.worksheet_range(sheet).map_err(|e| SinkError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect())
}

fn write_rows<'a>(
    path: &Path,
    sheet: &str,
    rows: impl Iterator<Item = &'a [String]>,
) -> Result<(), SinkError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet)?;
    for (r, row) in rows.enumerate() {
        for (c, cell) in row.iter().enumerate() {
            worksheet.write_string(r as u32, c as u16, cell.as_str())?;
        }
    }
    let buffer = workbook.save_to_buffer()?;

    let tmp = path.with_extension("xlsx.tmp");
    fs::write(&tmp, &buffer).map_err(|e| SinkError::Write {
        path: tmp.clone(),
        source: e,
    })?;
    fs::rename(&tmp, path).map_err(|e| SinkError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}
