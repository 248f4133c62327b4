//! 成绩提取器 - 业务能力层
//!
//! 按字段结构的列序逐格读取结果页。提取永不失败：定位不到或读取
//! 出错的单元格就地替换「未找到」，其余字段照常提取。成绩页上缺考
//! 科目留空是常态，因一格缺失放弃整行会丢掉本来有效的数据。

use tracing::debug;

use crate::infrastructure::PageDriver;
use crate::models::{Extraction, ScoreSchema, NOT_FOUND, TOTAL_LABEL};
use crate::portal::{Locator, PortalProfile};

/// 成绩提取器
pub struct ScoreExtractor {
    schema: ScoreSchema,
    portal: PortalProfile,
}

impl ScoreExtractor {
    pub fn new(schema: ScoreSchema, portal: PortalProfile) -> Self {
        Self { schema, portal }
    }

    pub fn schema(&self) -> &ScoreSchema {
        &self.schema
    }

    /// 提取结果页上声明的全部字段（含总分）
    ///
    /// 返回的单元格与 `ScoreSchema::columns()` 一一对应。
    pub async fn extract(&self, driver: &dyn PageDriver) -> Extraction {
        let mut cells = Vec::with_capacity(self.schema.column_count() - 1);
        for column in self.schema.columns() {
            let text = self
                .read_cell(driver, &column.label(), self.portal.locator_for(&column))
                .await;
            cells.push(text);
        }
        let total = self
            .read_cell(driver, TOTAL_LABEL, Some(&self.portal.total))
            .await;
        Extraction { cells, total }
    }

    /// 单格读取，缺失与故障一律替换为哨兵值，绝不向外抛错
    async fn read_cell(
        &self,
        driver: &dyn PageDriver,
        label: &str,
        locator: Option<&Locator>,
    ) -> String {
        let locator = match locator {
            Some(l) => l,
            None => {
                debug!("字段 {} 未声明定位，记为未找到", label);
                return NOT_FOUND.to_string();
            }
        };
        match driver.read_text(locator).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!("字段 {} 定位不到元素", label);
                NOT_FOUND.to_string()
            }
            Err(e) => {
                debug!("字段 {} 读取出错: {}", label, e);
                NOT_FOUND.to_string()
            }
        }
    }
}
