//! 单条记录处理流程 - 流程层
//!
//! 定义一名考生从提交查询到拿到整行数据的完整过程，并把查询错误
//! 归类为整行哨兵值：等待超时填「超时」，其余故障填「失败」。
//! 流程永远产出完整的一行，错误记入日志后吸收，不中断批量处理。

use tracing::{error, info, warn};

use crate::error::QueryError;
use crate::infrastructure::PageDriver;
use crate::models::{Extraction, StudentRecord, FAILED, TIMED_OUT};
use crate::services::{QuerySession, ScoreExtractor};
use crate::workflow::record_ctx::RecordCtx;

/// 单条记录的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// 查询成功，附提取到的总分文本
    Success { total: String },
    /// 表单元素等待超时，整行填「超时」
    TimedOut,
    /// 其他故障，整行填「失败」
    Failed,
}

/// 查询错误归类为记录结果
fn classify(err: &QueryError) -> RecordOutcome {
    if err.is_timeout() {
        RecordOutcome::TimedOut
    } else {
        RecordOutcome::Failed
    }
}

/// 单条记录处理流程
pub struct RecordFlow {
    session: QuerySession,
    extractor: ScoreExtractor,
}

impl RecordFlow {
    pub fn new(session: QuerySession, extractor: ScoreExtractor) -> Self {
        Self { session, extractor }
    }

    /// 处理一名考生：提交查询 → 提取成绩 → 错误归类
    ///
    /// 永远返回完整的一行数据，提交失败时整行填对应哨兵值。
    pub async fn process(
        &self,
        driver: &dyn PageDriver,
        record: &StudentRecord,
        ctx: &RecordCtx,
    ) -> (RecordOutcome, Extraction) {
        match self.session.submit(driver, record).await {
            Ok(()) => {
                let extraction = self.extractor.extract(driver).await;
                info!("{} ✓ 提取成绩成功：{} 总分：{}", ctx, record, extraction.total);
                (
                    RecordOutcome::Success {
                        total: extraction.total.clone(),
                    },
                    extraction,
                )
            }
            Err(err) => {
                let outcome = classify(&err);
                let sentinel = match outcome {
                    RecordOutcome::TimedOut => {
                        warn!("{} ⚠️ 查询超时：{}", ctx, err);
                        TIMED_OUT
                    }
                    _ => {
                        error!("{} ❌ 处理失败：{}", ctx, err);
                        FAILED
                    }
                };
                (outcome, Extraction::filled(self.extractor.schema(), sentinel))
            }
        }
    }

    /// 回到查询页，准备处理下一条
    pub async fn reset(&self, driver: &dyn PageDriver) -> Result<(), QueryError> {
        self.session.reset(driver).await
    }
}
