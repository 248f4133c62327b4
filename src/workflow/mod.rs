//! 流程层（Workflow Layer）
//!
//! 定义"一名考生"的完整处理流程：
//! - `RecordCtx` - 上下文封装（第几条 / 共几条）
//! - `RecordFlow` - 流程编排（提交 → 提取 → 错误归类）

pub mod record_ctx;
pub mod record_flow;

pub use record_ctx::RecordCtx;
pub use record_flow::{RecordFlow, RecordOutcome};
