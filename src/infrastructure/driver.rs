//! 浏览器操作能力抽象
//!
//! 业务层与流程层只依赖本 trait，不接触 chromiumoxide 类型，
//! 测试用内存桩替换真实浏览器。

use std::time::Duration;

use async_trait::async_trait;

use crate::error::QueryError;
use crate::portal::Locator;

/// 等待元素达到的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    /// 元素已出现在文档中
    Present,
    /// 元素可见且可点击
    Clickable,
}

impl ElementState {
    /// 状态的中文描述，用于超时消息
    pub fn describe(self) -> &'static str {
        match self {
            ElementState::Present => "出现",
            ElementState::Clickable => "可点击",
        }
    }
}

/// 浏览器页面驱动能力
///
/// 处理单条记录涉及的全部页面操作。任何实现都必须保证
/// `read_text` 对不存在的元素返回 `Ok(None)` 而不是错误：
/// 字段缺失是值，不是异常。
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// 导航到指定 URL
    async fn navigate(&self, url: &str) -> Result<(), QueryError>;

    /// 清空输入框并填入文本
    async fn fill(&self, locator: &Locator, value: &str) -> Result<(), QueryError>;

    /// 点击元素
    async fn click(&self, locator: &Locator) -> Result<(), QueryError>;

    /// 读取元素文本（去除首尾空白）；元素不存在时返回 None
    async fn read_text(&self, locator: &Locator) -> Result<Option<String>, QueryError>;

    /// 等待元素达到指定状态，超出时限返回 `QueryError::Timeout`
    async fn wait_for(
        &self,
        locator: &Locator,
        state: ElementState,
        timeout: Duration,
    ) -> Result<(), QueryError>;
}
