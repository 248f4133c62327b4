//! # Exam Score Query
//!
//! 中考成绩批量查询工具：按输入表格逐名考生驱动查询门户的表单，
//! 抓取结果页上的各科分数并逐条写入输出表格。
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `PageDriver` - 浏览器操作能力抽象（导航 / 填充 / 点击 / 读取 / 等待）
//! - `DomDriver` - 唯一的 page owner，chromiumoxide 实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个考生
//! - `QuerySession` - 提交一次查询的能力
//! - `ScoreExtractor` - 从结果页提取整行成绩的能力（逐格容错）
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一名考生"的完整处理流程
//! - `RecordCtx` - 上下文封装（第几条 / 共几条）
//! - `RecordFlow` - 流程编排（提交 → 提取 → 错误归类）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 管理浏览器资源和逐条调度，
//!   保证每条结果先落盘再前进
//!
//! ## 周边模块
//!
//! - `portal` - 查询门户配置（TOML 可载入，科目字段结构由定位表推导）
//! - `excel/` - 考生信息读取与成绩落盘（逐条追加、中断安全）
//! - `browser/` - 浏览器获取（自启无头模式或连接调试端口）
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod excel;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod portal;
pub mod services;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{QueryError, SinkError};
pub use excel::{load_students, ScoreSink};
pub use infrastructure::{DomDriver, ElementState, PageDriver};
pub use models::{Extraction, FieldKind, ScoreSchema, StudentRecord};
pub use orchestrator::App;
pub use portal::{Locator, PortalProfile};
pub use workflow::{RecordCtx, RecordFlow, RecordOutcome};
