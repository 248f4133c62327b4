//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责资源管理和逐条调度，是整个系统的"指挥中心"。
//!
//! ### `app` - 应用编排器
//! - 管理应用生命周期（初始化、运行、清理）
//! - 加载考生列表（Vec<StudentRecord>）与门户配置
//! - 管理浏览器资源（Browser、DomDriver），保证恰好关闭一次
//! - 每条记录处理完立即落盘，再前进到下一条
//! - 输出全局统计信息
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (处理 Vec<StudentRecord>)
//!     ↓
//! workflow::RecordFlow (处理单个 StudentRecord)
//!     ↓
//! services (能力层：QuerySession / ScoreExtractor)
//!     ↓
//! infrastructure (基础设施：PageDriver / DomDriver)
//! ```
//!
//! ## 设计原则
//!
//! 1. **严格串行**：一次只有一名考生在查询，没有并发
//! 2. **资源隔离**：只有编排层持有 Browser 和落盘句柄
//! 3. **先落盘再前进**：单条失败写哨兵行后继续，不中断批量
//! 4. **无业务逻辑**：只做调度和统计，不做具体页面操作

pub mod app;

// 重新导出主要类型
pub use app::App;
