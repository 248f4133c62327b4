//! DOM 驱动 - 基础设施层
//!
//! 持有唯一的 page 资源，把 `PageDriver` 的每个操作落实为一段
//! 在页面上求值的 JS。定位表达式由 `Locator` 生成，填入的文本
//! 一律经 JSON 转义后拼入脚本。

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tokio::time::sleep;

use crate::error::QueryError;
use crate::infrastructure::driver::{ElementState, PageDriver};
use crate::portal::Locator;

/// 元素状态轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// 文本读取脚本的返回值
///
/// 脚本始终返回对象而不是 null：CDP 对 null 返回值不带 value 字段，
/// 反序列化会直接报错。
#[derive(Deserialize)]
struct TextProbe {
    found: bool,
    #[serde(default)]
    text: String,
}

/// DOM 驱动
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 实现 PageDriver 的五个页面操作
/// - 不认识考生 / 科目
/// - 不处理业务流程
pub struct DomDriver {
    page: Page,
}

impl DomDriver {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 执行 JS 代码并反序列化为指定类型
    async fn eval<T: DeserializeOwned>(&self, js_code: String) -> Result<T, QueryError> {
        let result = self.page.evaluate(js_code).await?;
        let typed_value = result.into_value()?;
        Ok(typed_value)
    }

    /// 元素状态探测脚本，求值结果为 bool
    fn probe_script(locator: &Locator, state: ElementState) -> String {
        let lookup = locator.js_lookup();
        match state {
            ElementState::Present => format!("(() => {{ return !!({lookup}); }})()"),
            // 可点击 = 存在、未禁用、参与布局（offsetParent 为 null 说明不可见）
            ElementState::Clickable => format!(
                "(() => {{ const el = {lookup}; return !!el && !el.disabled && el.offsetParent !== null; }})()"
            ),
        }
    }
}

#[async_trait]
impl PageDriver for DomDriver {
    async fn navigate(&self, url: &str) -> Result<(), QueryError> {
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    async fn fill(&self, locator: &Locator, value: &str) -> Result<(), QueryError> {
        let js_code = format!(
            r#"
            (() => {{
                const el = {lookup};
                if (!el) {{ return false; }}
                el.value = {value};
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()
            "#,
            lookup = locator.js_lookup(),
            value = json!(value),
        );
        if self.eval::<bool>(js_code).await? {
            Ok(())
        } else {
            Err(QueryError::Failed(format!("输入框不存在: {}", locator)))
        }
    }

    async fn click(&self, locator: &Locator) -> Result<(), QueryError> {
        let js_code = format!(
            r#"
            (() => {{
                const el = {lookup};
                if (!el) {{ return false; }}
                el.click();
                return true;
            }})()
            "#,
            lookup = locator.js_lookup(),
        );
        if self.eval::<bool>(js_code).await? {
            Ok(())
        } else {
            Err(QueryError::Failed(format!("按钮不存在: {}", locator)))
        }
    }

    async fn read_text(&self, locator: &Locator) -> Result<Option<String>, QueryError> {
        let js_code = format!(
            r#"
            (() => {{
                const el = {lookup};
                if (!el) {{ return {{ found: false, text: '' }}; }}
                return {{ found: true, text: el.textContent || '' }};
            }})()
            "#,
            lookup = locator.js_lookup(),
        );
        let probe: TextProbe = self.eval(js_code).await?;
        if probe.found {
            Ok(Some(probe.text.trim().to_string()))
        } else {
            Ok(None)
        }
    }

    async fn wait_for(
        &self,
        locator: &Locator,
        state: ElementState,
        timeout: Duration,
    ) -> Result<(), QueryError> {
        let probe = Self::probe_script(locator, state);
        let poll = async {
            loop {
                // 页面跳转瞬间求值可能失败，当作「尚未就绪」继续轮询
                if let Ok(true) = self.eval::<bool>(probe.clone()).await {
                    break;
                }
                sleep(POLL_INTERVAL).await;
            }
        };
        tokio::time::timeout(timeout, poll).await.map_err(|_| {
            QueryError::Timeout(format!(
                "元素 {} 在 {} 秒内未{}",
                locator,
                timeout.as_secs(),
                state.describe()
            ))
        })
    }
}
