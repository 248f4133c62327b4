//! 流程层端到端测试（内存桩驱动）
//!
//! 用桩实现替代真实浏览器，验证提交交互、字段级容错、
//! 错误归类与输出行的矩形不变量。

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use exam_score_query::error::QueryError;
use exam_score_query::infrastructure::{ElementState, PageDriver};
use exam_score_query::models::{StudentRecord, FAILED, NOT_FOUND, TIMED_OUT};
use exam_score_query::portal::{Locator, PortalProfile, SubjectLocators};
use exam_score_query::services::{QuerySession, ScoreExtractor};
use exam_score_query::workflow::{RecordCtx, RecordFlow, RecordOutcome};

/// 测试桩：用 HashMap 模拟页面上的元素文本
#[derive(Default)]
struct StubDriver {
    /// 键为定位器的显示形式，值为元素文本
    texts: HashMap<String, String>,
    /// read_text 时直接报错的定位器（模拟元素失效）
    broken: HashSet<String>,
    /// wait_for 时超时的定位器
    unreachable: HashSet<String>,
    /// 任何 fill 都报错（模拟页面整体失效）
    fail_fill: bool,
    fills: Mutex<Vec<(String, String)>>,
    clicks: Mutex<Vec<String>>,
    waits: Mutex<Vec<(String, ElementState)>>,
    navigations: Mutex<Vec<String>>,
}

impl StubDriver {
    fn with_text(mut self, locator: &Locator, text: &str) -> Self {
        self.texts.insert(locator.to_string(), text.to_string());
        self
    }

    fn with_broken(mut self, locator: &Locator) -> Self {
        self.broken.insert(locator.to_string());
        self
    }

    fn with_unreachable(mut self, locator: &Locator) -> Self {
        self.unreachable.insert(locator.to_string());
        self
    }
}

#[async_trait]
impl PageDriver for StubDriver {
    async fn navigate(&self, url: &str) -> Result<(), QueryError> {
        self.navigations.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn fill(&self, locator: &Locator, value: &str) -> Result<(), QueryError> {
        if self.fail_fill {
            return Err(QueryError::Failed("页面已失效".to_string()));
        }
        self.fills
            .lock()
            .unwrap()
            .push((locator.to_string(), value.to_string()));
        Ok(())
    }

    async fn click(&self, locator: &Locator) -> Result<(), QueryError> {
        self.clicks.lock().unwrap().push(locator.to_string());
        Ok(())
    }

    async fn read_text(&self, locator: &Locator) -> Result<Option<String>, QueryError> {
        let key = locator.to_string();
        if self.broken.contains(&key) {
            return Err(QueryError::Failed("元素已失效".to_string()));
        }
        Ok(self.texts.get(&key).cloned())
    }

    async fn wait_for(
        &self,
        locator: &Locator,
        state: ElementState,
        _timeout: Duration,
    ) -> Result<(), QueryError> {
        let key = locator.to_string();
        self.waits.lock().unwrap().push((key.clone(), state));
        if self.unreachable.contains(&key) {
            return Err(QueryError::Timeout(format!("元素 {} 未出现", key)));
        }
        Ok(())
    }
}

/// 成绩表单元格定位，与内置门户配置同一套 XPath 模板
fn cell(subject: &str, col: usize) -> Locator {
    Locator::XPath(format!(r#"//tr[contains(td, "{}")]/td[{}]"#, subject, col))
}

/// 小型门户配置：语文（原始分 + 等级）、物理（三列）、体育（仅原始分）
fn test_portal() -> PortalProfile {
    PortalProfile {
        query_url: "http://portal.test/login.aspx".to_string(),
        exam_no_input: Locator::Name("ks_ksno".to_string()),
        ticket_no_input: Locator::Name("zkzh".to_string()),
        name_input: Locator::Name("ks_xm".to_string()),
        query_button: Locator::Id("Button1".to_string()),
        results_marker: None,
        subjects: vec![
            SubjectLocators {
                subject: "语文".to_string(),
                raw: cell("语文", 2),
                converted: None,
                grade: Some(cell("语文", 3)),
            },
            SubjectLocators {
                subject: "物理".to_string(),
                raw: cell("物理", 2),
                converted: Some(cell("物理", 3)),
                grade: Some(cell("物理", 4)),
            },
            SubjectLocators {
                subject: "体育".to_string(),
                raw: cell("体育", 2),
                converted: None,
                grade: None,
            },
        ],
        total: Locator::XPath("//div[@id='total']".to_string()),
    }
}

fn flow_for(portal: &PortalProfile) -> RecordFlow {
    RecordFlow::new(
        QuerySession::new(portal.clone(), Duration::from_secs(1), Duration::from_millis(0)),
        ScoreExtractor::new(portal.schema(), portal.clone()),
    )
}

fn zhang_san() -> StudentRecord {
    StudentRecord::new("2024001", "A1001", "张三")
}

/// 结果页数据齐全（语文等级除外）的桩
fn driver_with_scores(portal: &PortalProfile) -> StubDriver {
    StubDriver::default()
        .with_text(&cell("语文", 2), "98")
        // 语文等级单元格在页面上不存在
        .with_text(&cell("物理", 2), "87")
        .with_text(&cell("物理", 3), "78.3")
        .with_text(&cell("物理", 4), "B")
        .with_text(&cell("体育", 2), "29")
        .with_text(&portal.total, "292")
}

#[tokio::test]
async fn test_extracts_declared_fields_and_marks_missing_grade() {
    let portal = test_portal();
    let driver = driver_with_scores(&portal);
    let flow = flow_for(&portal);

    let (outcome, extraction) = flow
        .process(&driver, &zhang_san(), &RecordCtx::new(1, 1))
        .await;

    assert_eq!(
        outcome,
        RecordOutcome::Success {
            total: "292".to_string()
        }
    );
    let row = extraction.into_row(&zhang_san());
    // 身份三列 + 六个成绩列 + 总分
    assert_eq!(row.len(), 3 + portal.schema().column_count());
    assert_eq!(
        row,
        ["2024001", "A1001", "张三", "98", NOT_FOUND, "87", "78.3", "B", "29", "292"]
    );
}

#[tokio::test]
async fn test_broken_cell_does_not_affect_siblings() {
    let portal = test_portal();
    // 物理折算分读取报错，其余字段应原样提取
    let driver = driver_with_scores(&portal).with_broken(&cell("物理", 3));
    let flow = flow_for(&portal);

    let (outcome, extraction) = flow
        .process(&driver, &zhang_san(), &RecordCtx::new(1, 1))
        .await;

    assert!(matches!(outcome, RecordOutcome::Success { .. }));
    assert_eq!(extraction.cells, ["98", NOT_FOUND, "87", NOT_FOUND, "B", "29"]);
    assert_eq!(extraction.total, "292");
}

#[tokio::test]
async fn test_submit_failure_fills_failed_sentinel() {
    let portal = test_portal();
    let driver = StubDriver {
        fail_fill: true,
        ..StubDriver::default()
    };
    let flow = flow_for(&portal);

    let (outcome, extraction) = flow
        .process(&driver, &zhang_san(), &RecordCtx::new(1, 1))
        .await;

    assert_eq!(outcome, RecordOutcome::Failed);
    assert!(extraction.cells.iter().all(|c| c == FAILED));
    assert_eq!(extraction.total, FAILED);
    // 哨兵行保持矩形
    let row = extraction.into_row(&zhang_san());
    assert_eq!(row.len(), 3 + portal.schema().column_count());
}

#[tokio::test]
async fn test_wait_timeout_fills_timeout_sentinel() {
    let portal = test_portal();
    let driver = StubDriver::default().with_unreachable(&portal.exam_no_input);
    let flow = flow_for(&portal);

    let (outcome, extraction) = flow
        .process(&driver, &zhang_san(), &RecordCtx::new(1, 1))
        .await;

    // 超时与失败是两种不同的哨兵
    assert_eq!(outcome, RecordOutcome::TimedOut);
    assert!(extraction.cells.iter().all(|c| c == TIMED_OUT));
    assert_eq!(extraction.total, TIMED_OUT);
    assert_ne!(TIMED_OUT, FAILED);
}

#[tokio::test]
async fn test_submit_fills_identity_and_clicks_query() {
    let portal = test_portal();
    let driver = driver_with_scores(&portal);
    let flow = flow_for(&portal);

    flow.process(&driver, &zhang_san(), &RecordCtx::new(1, 1))
        .await;

    let fills = driver.fills.lock().unwrap().clone();
    assert_eq!(
        fills,
        [
            (portal.exam_no_input.to_string(), "2024001".to_string()),
            (portal.ticket_no_input.to_string(), "A1001".to_string()),
            (portal.name_input.to_string(), "张三".to_string()),
        ]
    );

    let clicks = driver.clicks.lock().unwrap().clone();
    assert_eq!(clicks, [portal.query_button.to_string()]);

    // 输入框等 Present，按钮等 Clickable
    let waits = driver.waits.lock().unwrap().clone();
    assert!(waits.contains(&(portal.exam_no_input.to_string(), ElementState::Present)));
    assert!(waits.contains(&(portal.query_button.to_string(), ElementState::Clickable)));
}

#[tokio::test]
async fn test_results_marker_waits_instead_of_settle() {
    let mut portal = test_portal();
    portal.results_marker = Some(Locator::Css("#result-table".to_string()));
    let driver = driver_with_scores(&portal);
    let flow = flow_for(&portal);

    flow.process(&driver, &zhang_san(), &RecordCtx::new(1, 1))
        .await;

    let waits = driver.waits.lock().unwrap().clone();
    assert!(waits.contains(&("css=#result-table".to_string(), ElementState::Present)));
}

#[tokio::test]
async fn test_results_marker_timeout_marks_whole_record() {
    let mut portal = test_portal();
    let marker = Locator::Css("#result-table".to_string());
    portal.results_marker = Some(marker.clone());
    let driver = driver_with_scores(&portal).with_unreachable(&marker);
    let flow = flow_for(&portal);

    let (outcome, extraction) = flow
        .process(&driver, &zhang_san(), &RecordCtx::new(1, 1))
        .await;

    assert_eq!(outcome, RecordOutcome::TimedOut);
    assert!(extraction.cells.iter().all(|c| c == TIMED_OUT));
}

#[tokio::test]
async fn test_reset_returns_to_query_page() {
    let portal = test_portal();
    let driver = StubDriver::default();
    let flow = flow_for(&portal);

    flow.reset(&driver).await.expect("返回查询页失败");

    let navigations = driver.navigations.lock().unwrap().clone();
    assert_eq!(navigations, [portal.query_url]);
}
