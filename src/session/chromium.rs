use std::time::Duration;

use chromiumoxide::element::Element;
use chromiumoxide::Page;
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::error::SessionError;
use crate::session::SessionDriver;

/// 元素探测的轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// 基于 chromiumoxide 的会话驱动
///
/// 持有唯一的 Page 资源，只暴露会话能力。
/// `find_element` 本身立即返回，不等元素出现，这里在超时内
/// 轮询，向上表达"存在/不存在"。操作类动作用 `element_timeout`
/// 等元素出现；`find` 的存在性探测大多以"不存在"收尾（比如
/// 末页探测下一页按钮），用更短的 `probe_timeout`，免得每一项
/// 都在最后一页干等满额超时。
pub struct ChromiumDriver {
    page: Page,
    element_timeout: Duration,
    probe_timeout: Duration,
}

impl ChromiumDriver {
    pub fn new(page: Page, element_timeout: Duration, probe_timeout: Duration) -> Self {
        Self {
            page,
            element_timeout,
            probe_timeout,
        }
    }

    /// 获取 page 引用（集成测试用）
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 在给定超时内轮询定位元素
    async fn locate_within(&self, selector: &str, timeout: Duration) -> Option<Element> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.page.find_element(selector).await {
                Ok(element) => return Some(element),
                Err(_) if Instant::now() < deadline => sleep(POLL_INTERVAL).await,
                Err(e) => {
                    debug!("超时内未匹配到 {}: {}", selector, e);
                    return None;
                }
            }
        }
    }

    async fn locate(&self, selector: &str) -> Option<Element> {
        self.locate_within(selector, self.element_timeout).await
    }
}

impl SessionDriver for ChromiumDriver {
    async fn navigate(&self, url: &str) -> Result<(), SessionError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| SessionError::NavigationFailed {
                url: url.to_string(),
                source: Box::new(e),
            })?;
        Ok(())
    }

    async fn click(&self, selector: &str, description: &str) -> Result<(), SessionError> {
        let element = self
            .locate(selector)
            .await
            .ok_or_else(|| SessionError::not_found(selector, description))?;
        element
            .click()
            .await
            .map_err(|e| SessionError::action_failed("点击", selector, e))?;
        Ok(())
    }

    async fn type_text(
        &self,
        selector: &str,
        text: &str,
        description: &str,
    ) -> Result<(), SessionError> {
        let element = self
            .locate(selector)
            .await
            .ok_or_else(|| SessionError::not_found(selector, description))?;
        element
            .click()
            .await
            .map_err(|e| SessionError::action_failed("聚焦", selector, e))?;
        element
            .type_str(text)
            .await
            .map_err(|e| SessionError::action_failed("输入", selector, e))?;
        Ok(())
    }

    async fn wait_for_load(&self) -> Result<(), SessionError> {
        self.page
            .wait_for_navigation()
            .await
            .map_err(|_| SessionError::LoadTimeout)?;
        Ok(())
    }

    async fn find(&self, selector: &str) -> Result<bool, SessionError> {
        Ok(self
            .locate_within(selector, self.probe_timeout)
            .await
            .is_some())
    }

    async fn current_html(&self) -> Result<String, SessionError> {
        self.page
            .content()
            .await
            .map_err(|e| SessionError::HtmlUnavailable {
                source: Box::new(e),
            })
    }
}
