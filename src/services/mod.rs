//! 业务能力层（Services Layer）
//!
//! 描述"我能做什么"，只处理单个考生：
//! - `QuerySession` - 提交一次查询（等待 / 填充 / 点击 / 结果等待）
//! - `ScoreExtractor` - 从结果页提取整行成绩（逐格容错）
//!
//! 本层不出现考生列表，不关心处理顺序。

pub mod extractor;
pub mod query_session;

pub use extractor::ScoreExtractor;
pub use query_session::QuerySession;
