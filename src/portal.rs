//! 查询门户配置
//!
//! 查询页 URL、表单元素与成绩单元格的定位方式都在这里声明，
//! 可从外部 TOML 文件载入（见 portal.example.toml），缺省使用内置配置。
//! 科目字段结构由定位表推导，新增科目或字段只需要改配置。

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;

use crate::models::{FieldKind, ScoreColumn, ScoreSchema, SubjectFields};

/// 页面元素定位方式
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locator {
    /// 按元素 id 定位
    Id(String),
    /// 按 name 属性定位，取第一个匹配
    Name(String),
    /// CSS 选择器
    Css(String),
    /// XPath 表达式
    XPath(String),
}

impl Locator {
    /// 生成在页面上查找该元素的 JS 表达式，求值结果为元素或 null
    ///
    /// 定位参数一律经 JSON 转义后拼入脚本。
    pub fn js_lookup(&self) -> String {
        match self {
            Locator::Id(id) => format!("document.getElementById({})", json!(id)),
            Locator::Name(name) => {
                format!("(document.getElementsByName({})[0] || null)", json!(name))
            }
            Locator::Css(selector) => format!("document.querySelector({})", json!(selector)),
            Locator::XPath(xpath) => format!(
                "document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
                json!(xpath)
            ),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Id(id) => write!(f, "id={}", id),
            Locator::Name(name) => write!(f, "name={}", name),
            Locator::Css(selector) => write!(f, "css={}", selector),
            Locator::XPath(xpath) => write!(f, "xpath={}", xpath),
        }
    }
}

/// 单个科目的成绩单元格定位
///
/// 声明了哪些单元格，该科目在输出表头里就有哪些列。
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectLocators {
    /// 科目名
    pub subject: String,
    /// 原始分单元格
    pub raw: Locator,
    /// 折算分单元格（部分科目没有）
    #[serde(default)]
    pub converted: Option<Locator>,
    /// 等级单元格（部分科目没有）
    #[serde(default)]
    pub grade: Option<Locator>,
}

/// 查询门户完整配置
#[derive(Debug, Clone, Deserialize)]
pub struct PortalProfile {
    /// 查询页 URL
    pub query_url: String,
    /// 考生号输入框
    pub exam_no_input: Locator,
    /// 准考证号输入框
    pub ticket_no_input: Locator,
    /// 姓名输入框
    pub name_input: Locator,
    /// 查询按钮
    pub query_button: Locator,
    /// 结果页渲染完成的标志元素；未配置时提交后退回固定延时等待
    #[serde(default)]
    pub results_marker: Option<Locator>,
    /// 各科目的成绩单元格
    pub subjects: Vec<SubjectLocators>,
    /// 总分单元格
    pub total: Locator,
}

impl PortalProfile {
    /// 从 TOML 文件载入门户配置
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取门户配置文件: {}", path.display()))?;
        let profile: PortalProfile = toml::from_str(&content)
            .with_context(|| format!("无法解析门户配置文件: {}", path.display()))?;
        Ok(profile)
    }

    /// 由定位表推导科目字段结构
    ///
    /// 声明了哪些单元格定位，该科目就有哪些字段，顺序固定为
    /// 原始分 → 折算分 → 等级。
    pub fn schema(&self) -> ScoreSchema {
        let subjects = self
            .subjects
            .iter()
            .map(|s| {
                let mut kinds = vec![FieldKind::Raw];
                if s.converted.is_some() {
                    kinds.push(FieldKind::Converted);
                }
                if s.grade.is_some() {
                    kinds.push(FieldKind::Grade);
                }
                SubjectFields {
                    subject: s.subject.clone(),
                    kinds,
                }
            })
            .collect();
        ScoreSchema::new(subjects)
    }

    /// 查找某一列对应的单元格定位；该科目未声明该字段时返回 None
    pub fn locator_for(&self, column: &ScoreColumn) -> Option<&Locator> {
        let entry = self.subjects.iter().find(|s| s.subject == column.subject)?;
        match column.kind {
            FieldKind::Raw => Some(&entry.raw),
            FieldKind::Converted => entry.converted.as_ref(),
            FieldKind::Grade => entry.grade.as_ref(),
        }
    }
}

impl Default for PortalProfile {
    /// 内置配置，与 portal.example.toml 保持同步
    fn default() -> Self {
        Self {
            query_url: "http://27.150.22.198:9001/login.aspx".to_string(),
            exam_no_input: Locator::Name("ks_ksno".to_string()),
            ticket_no_input: Locator::Name("zkzh".to_string()),
            name_input: Locator::Name("ks_xm".to_string()),
            query_button: Locator::Id("Button1".to_string()),
            results_marker: None,
            subjects: vec![
                subject_with_grade("语文"),
                subject_with_grade("数学"),
                subject_with_grade("英语"),
                // 体育只公布原始分
                SubjectLocators {
                    subject: "体育".to_string(),
                    raw: row_cell("体育", 2),
                    converted: None,
                    grade: None,
                },
                subject_with_converted("物理"),
                subject_with_converted("化学"),
                subject_with_converted("道德与法治"),
                subject_with_converted("历史"),
                subject_with_converted("地理"),
                subject_with_converted("生物"),
            ],
            total: Locator::XPath(
                r#"//div[contains(text(), "总分")]/following-sibling::div"#.to_string(),
            ),
        }
    }
}

/// 成绩表第 `col` 列的单元格，按行首科目名定位
fn row_cell(subject: &str, col: usize) -> Locator {
    Locator::XPath(format!(r#"//tr[contains(td, "{}")]/td[{}]"#, subject, col))
}

/// 原始分 + 等级两列的科目
fn subject_with_grade(subject: &str) -> SubjectLocators {
    SubjectLocators {
        subject: subject.to_string(),
        raw: row_cell(subject, 2),
        converted: None,
        grade: Some(row_cell(subject, 3)),
    }
}

/// 原始分 + 折算分 + 等级三列的科目
fn subject_with_converted(subject: &str) -> SubjectLocators {
    SubjectLocators {
        subject: subject.to_string(),
        raw: row_cell(subject, 2),
        converted: Some(row_cell(subject, 3)),
        grade: Some(row_cell(subject, 4)),
    }
}
