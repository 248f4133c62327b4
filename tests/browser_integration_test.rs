//! 真实浏览器冒烟测试
//!
//! 默认忽略，需要本机可用的 Chrome / Edge（连接测试还需要
//! 以 --remote-debugging-port 启动的浏览器）。

use std::time::Duration;

use exam_score_query::browser::{connect_to_browser_and_page, launch_headless_browser};
use exam_score_query::infrastructure::DomDriver;
use exam_score_query::logger;
use exam_score_query::models::StudentRecord;
use exam_score_query::portal::PortalProfile;
use exam_score_query::services::{QuerySession, ScoreExtractor};
use exam_score_query::Config;

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_headless_launch_and_navigate() {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::from_env();
    let portal = PortalProfile::default();

    // 启动无头浏览器并导航到查询页
    let (_browser, page) =
        launch_headless_browser(&portal.query_url, config.browser_executable.as_deref())
            .await
            .expect("启动无头浏览器失败");

    let url = page.url().await.expect("获取页面地址失败");
    assert!(url.is_some(), "页面应该已经完成导航");
}

#[tokio::test]
#[ignore]
async fn test_browser_connection() {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::from_env();
    let port = config.browser_debug_port.unwrap_or(9222);
    let portal = PortalProfile::default();

    // 测试浏览器连接
    let result = connect_to_browser_and_page(port, &portal.query_url).await;

    assert!(result.is_ok(), "应该能够连接到调试端口上的浏览器");
}

#[tokio::test]
#[ignore]
async fn test_single_record_query() {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::from_env();
    let portal = PortalProfile::default();

    let (_browser, page) =
        launch_headless_browser(&portal.query_url, config.browser_executable.as_deref())
            .await
            .expect("启动无头浏览器失败");
    let driver = DomDriver::new(page);

    let session = QuerySession::new(
        portal.clone(),
        Duration::from_secs(config.wait_timeout_secs),
        Duration::from_millis(config.settle_ms),
    );
    let extractor = ScoreExtractor::new(portal.schema(), portal.clone());

    // 注意：请换成真实的考生信息后运行
    let record = StudentRecord::new("2024001", "10250102", "张三");
    session.submit(&driver, &record).await.expect("提交查询失败");

    let extraction = extractor.extract(&driver).await;
    println!("总分：{}，各科：{:?}", extraction.total, extraction.cells);
    assert_eq!(
        extraction.cells.len(),
        portal.schema().column_count() - 1,
        "提取结果应覆盖声明的全部列"
    );
}
