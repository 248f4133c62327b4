//! 应用编排器 - 编排层
//!
//! ## 职责
//! 1. **应用初始化**：加载门户配置、启动或连接浏览器、导航到查询页，
//!    这一步的任何失败都发生在处理第一条记录之前，直接终止运行
//! 2. **逐条调度**：严格串行，一次只有一名考生在查询
//! 3. **资源管理**：唯一持有 Browser 与 DomDriver，无论哪条退出路径
//!    都恰好关闭一次
//! 4. **落盘保证**：每条记录处理完立即写入输出文件，中途终止最多丢一条
//! 5. **全局统计**：汇总成功 / 超时 / 失败，报告输出文件绝对路径

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chromiumoxide::Browser;
use tracing::{debug, error, info, warn};

use crate::browser;
use crate::config::Config;
use crate::error::SinkError;
use crate::excel::{load_students, ScoreSink};
use crate::infrastructure::DomDriver;
use crate::models::StudentRecord;
use crate::portal::PortalProfile;
use crate::services::{QuerySession, ScoreExtractor};
use crate::workflow::{RecordCtx, RecordFlow, RecordOutcome};

/// 应用编排器
pub struct App {
    config: Config,
    portal: PortalProfile,
    browser: Browser,
    driver: DomDriver,
    /// 浏览器是否由本程序自启（自启的退出时关闭，外部的只断开）
    owns_browser: bool,
}

impl App {
    /// 初始化应用：门户配置、浏览器会话、查询页导航
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let portal = match &config.portal_file {
            Some(path) => PortalProfile::load(Path::new(path)).context("加载门户配置失败")?,
            None => PortalProfile::default(),
        };
        info!("门户配置就绪，共 {} 个科目", portal.subjects.len());

        let (browser, page, owns_browser) = match config.browser_debug_port {
            Some(port) => {
                let (browser, page) =
                    browser::connect_to_browser_and_page(port, &portal.query_url)
                        .await
                        .context("无法建立浏览器会话")?;
                (browser, page, false)
            }
            None => {
                let (browser, page) = browser::launch_headless_browser(
                    &portal.query_url,
                    config.browser_executable.as_deref(),
                )
                .await
                .context("无法建立浏览器会话")?;
                (browser, page, true)
            }
        };

        Ok(Self {
            config,
            portal,
            browser,
            driver: DomDriver::new(page),
            owns_browser,
        })
    }

    /// 运行主流程
    ///
    /// 无论结果如何，返回前都会关闭浏览器会话。
    pub async fn run(mut self) -> Result<()> {
        let result = self.run_records().await;
        self.shutdown().await;
        result
    }

    async fn run_records(&mut self) -> Result<()> {
        let schema = self.portal.schema();

        let students = load_students(
            Path::new(&self.config.input_path),
            &self.config.input_sheet,
        )?;
        if students.is_empty() {
            warn!("⚠️ 没有找到考生信息，程序结束");
            return Ok(());
        }

        let mut sink = ScoreSink::create(
            Path::new(&self.config.output_path),
            &self.config.output_sheet,
            &schema,
        )?;

        // 续跑模式：跳过输出文件里已有结果的考生号
        let queried: HashSet<String> = if self.config.skip_queried {
            let existing = sink.existing_exam_numbers()?;
            if !existing.is_empty() {
                info!("输出文件已有 {} 条结果，续跑模式将跳过对应考生", existing.len());
            }
            existing
        } else {
            HashSet::new()
        };

        let flow = RecordFlow::new(
            QuerySession::new(
                self.portal.clone(),
                Duration::from_secs(self.config.wait_timeout_secs),
                Duration::from_millis(self.config.settle_ms),
            ),
            ScoreExtractor::new(schema, self.portal.clone()),
        );

        let total = students.len();
        let mut stats = RunStats {
            total,
            ..Default::default()
        };
        let mut abort: Option<SinkError> = None;

        for (idx, student) in students.iter().enumerate() {
            let ctx = RecordCtx::new(idx + 1, total);

            if self.config.skip_queried && queried.contains(&student.exam_no) {
                info!("{} 已有查询结果，跳过：{}", ctx, student);
                stats.skipped += 1;
                continue;
            }

            log_record_start(&ctx, student);

            let (outcome, extraction) = flow.process(&self.driver, student, &ctx).await;

            // 先落盘再前进：输出文件（含备用路径）写不进去才中止运行
            if let Err(e) = sink.append_row(&extraction.into_row(student)) {
                error!("{} ❌ 成绩行无法写入，中止处理后续考生", ctx);
                abort = Some(e);
                break;
            }
            debug!("{} 成绩已写入输出文件", ctx);

            match outcome {
                RecordOutcome::Success { .. } => stats.success += 1,
                RecordOutcome::TimedOut => stats.timeout += 1,
                RecordOutcome::Failed => stats.failed += 1,
            }

            // 回查询页失败不终止批量，下一条会在等待输入框时归为超时
            if let Err(e) = flow.reset(&self.driver).await {
                warn!("{} ⚠️ 返回查询页失败：{}", ctx, e);
            }
        }

        // 中止也报告统计与输出位置，已落盘的结果仍然有效
        log_final_stats(&stats, sink.path());
        match abort {
            Some(e) => Err(e).context("输出文件写入失败"),
            None => Ok(()),
        }
    }

    /// 关闭浏览器会话
    ///
    /// 自启的浏览器进程随之退出，外部浏览器只断开连接。
    async fn shutdown(&mut self) {
        if self.owns_browser {
            if let Err(e) = self.browser.close().await {
                warn!("⚠️ 关闭浏览器失败: {}", e);
            }
            let _ = self.browser.wait().await;
        }
        info!("浏览器会话已关闭");
    }
}

/// 运行统计
#[derive(Debug, Default)]
struct RunStats {
    success: usize,
    timeout: usize,
    failed: usize,
    skipped: usize,
    total: usize,
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 中考成绩批量查询");
    info!("📄 输入文件: {}（{}）", config.input_path, config.input_sheet);
    info!("📊 输出文件: {}（{}）", config.output_path, config.output_sheet);
    if let Some(port) = config.browser_debug_port {
        info!("🔗 浏览器: 连接调试端口 {}", port);
    } else {
        info!("🔗 浏览器: 自启无头模式");
    }
    info!("{}", "=".repeat(60));
}

fn log_record_start(ctx: &RecordCtx, record: &StudentRecord) {
    info!("\n处理第 {}/{} 位考生：{}", ctx.index, ctx.total, record);
}

fn log_final_stats(stats: &RunStats, output_path: &Path) {
    let resolved = std::fs::canonicalize(output_path).unwrap_or_else(|_| output_path.to_path_buf());
    info!("\n{}", "=".repeat(60));
    info!("📊 全部考生处理完毕");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", stats.success, stats.total);
    info!("⚠️ 超时: {}", stats.timeout);
    info!("❌ 失败: {}", stats.failed);
    if stats.skipped > 0 {
        info!("📋 跳过（已有结果）: {}", stats.skipped);
    }
    info!("{}", "=".repeat(60));
    info!("\n结果已保存至: {}", resolved.display());
}
