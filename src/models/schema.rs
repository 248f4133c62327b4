//! 科目字段结构
//!
//! 每个科目在成绩页上有哪几类字段（原始分 / 折算分 / 等级）由配置声明，
//! 表头生成、成绩提取、行组装三处共用同一份展开结果 `columns()`，
//! 增删科目只改配置，不改代码。

/// 总分列的列名
pub const TOTAL_LABEL: &str = "总分";

/// 成绩字段种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 原始分
    Raw,
    /// 折算分
    Converted,
    /// 等级
    Grade,
}

impl FieldKind {
    /// 列名后缀
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Raw => "原始分",
            FieldKind::Converted => "折算分",
            FieldKind::Grade => "等级",
        }
    }
}

/// 单个科目声明的字段列表
#[derive(Debug, Clone)]
pub struct SubjectFields {
    /// 科目名（如「语文」「道德与法治」）
    pub subject: String,
    /// 该科目有哪些字段，顺序即列序
    pub kinds: Vec<FieldKind>,
}

/// 全部科目的字段结构
///
/// 一次构建，整个运行期间不变。
#[derive(Debug, Clone)]
pub struct ScoreSchema {
    subjects: Vec<SubjectFields>,
}

/// 展开后的一列：科目 × 字段种类
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreColumn {
    pub subject: String,
    pub kind: FieldKind,
}

impl ScoreColumn {
    /// 输出表头中的列名（如「语文_原始分」）
    pub fn label(&self) -> String {
        format!("{}_{}", self.subject, self.kind.label())
    }
}

impl ScoreSchema {
    pub fn new(subjects: Vec<SubjectFields>) -> Self {
        Self { subjects }
    }

    /// 查询某科目声明的字段种类
    pub fn fields_for(&self, subject: &str) -> Option<&[FieldKind]> {
        self.subjects
            .iter()
            .find(|s| s.subject == subject)
            .map(|s| s.kinds.as_slice())
    }

    /// 按声明顺序展开为（科目 × 字段）列序列，不含总分列
    pub fn columns(&self) -> Vec<ScoreColumn> {
        self.subjects
            .iter()
            .flat_map(|s| {
                s.kinds.iter().map(|&kind| ScoreColumn {
                    subject: s.subject.clone(),
                    kind,
                })
            })
            .collect()
    }

    /// 成绩列总数（含总分列）
    pub fn column_count(&self) -> usize {
        self.subjects.iter().map(|s| s.kinds.len()).sum::<usize>() + 1
    }

    /// 成绩列名（含末尾的总分列），与 `columns()` 严格同序
    pub fn column_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.columns().iter().map(ScoreColumn::label).collect();
        labels.push(TOTAL_LABEL.to_string());
        labels
    }
}
