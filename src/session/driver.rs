use crate::error::SessionError;

/// 浏览器会话能力边界
///
/// 所有操作都在有界超时内阻塞；选择器在超时内无匹配时，
/// `find` 以 `false` 表达"不存在"而不是报错——"下一页按钮不存在"
/// 是当前分类号翻页结束的权威信号，不是故障。
#[allow(async_fn_in_trait)]
pub trait SessionDriver {
    /// 导航到指定 URL
    async fn navigate(&self, url: &str) -> Result<(), SessionError>;

    /// 定位并点击元素；`description` 仅用于错误与日志
    async fn click(&self, selector: &str, description: &str) -> Result<(), SessionError>;

    /// 定位输入框并输入文本
    async fn type_text(
        &self,
        selector: &str,
        text: &str,
        description: &str,
    ) -> Result<(), SessionError>;

    /// 等待页面加载完成信号
    async fn wait_for_load(&self) -> Result<(), SessionError>;

    /// 超时内探测选择器是否有匹配；不存在不算错误
    async fn find(&self, selector: &str) -> Result<bool, SessionError>;

    /// 当前页面的完整 HTML
    async fn current_html(&self) -> Result<String, SessionError>;
}
