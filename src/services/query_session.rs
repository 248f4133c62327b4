//! 查询会话 - 业务能力层
//!
//! 只负责「提交一次查询」：等待三个输入框就绪、填入身份信息、
//! 点击查询按钮并等待结果页渲染。会话在整个运行期间复用，
//! 不按记录重建。

use std::time::Duration;

use tracing::{debug, info};

use crate::error::QueryError;
use crate::infrastructure::{ElementState, PageDriver};
use crate::models::StudentRecord;
use crate::portal::PortalProfile;

/// 查询会话
pub struct QuerySession {
    portal: PortalProfile,
    wait_timeout: Duration,
    settle: Duration,
}

impl QuerySession {
    pub fn new(portal: PortalProfile, wait_timeout: Duration, settle: Duration) -> Self {
        Self {
            portal,
            wait_timeout,
            settle,
        }
    }

    /// 提交一名考生的查询，返回时结果页已就绪
    ///
    /// 任一表单元素未在时限内就绪返回 `Timeout`，其余故障返回 `Failed`，
    /// 由上层决定整行填哪种哨兵值。
    pub async fn submit(
        &self,
        driver: &dyn PageDriver,
        record: &StudentRecord,
    ) -> Result<(), QueryError> {
        let inputs = [
            (&self.portal.exam_no_input, record.exam_no.as_str()),
            (&self.portal.ticket_no_input, record.ticket_no.as_str()),
            (&self.portal.name_input, record.name.as_str()),
        ];
        for (locator, value) in inputs {
            driver
                .wait_for(locator, ElementState::Present, self.wait_timeout)
                .await?;
            driver.fill(locator, value).await?;
        }
        info!("已填充考生信息");

        driver
            .wait_for(&self.portal.query_button, ElementState::Clickable, self.wait_timeout)
            .await?;
        driver.click(&self.portal.query_button).await?;
        info!("已点击查询按钮，等待结果...");

        // 配置了结果标志元素就条件等待，否则退回固定延时
        match &self.portal.results_marker {
            Some(marker) => {
                driver
                    .wait_for(marker, ElementState::Present, self.wait_timeout)
                    .await?
            }
            None => tokio::time::sleep(self.settle).await,
        }
        Ok(())
    }

    /// 回到查询页，准备下一次提交
    pub async fn reset(&self, driver: &dyn PageDriver) -> Result<(), QueryError> {
        debug!("返回查询页: {}", self.portal.query_url);
        driver.navigate(&self.portal.query_url).await
    }
}
