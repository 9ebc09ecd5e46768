use std::fmt;

/// 爬虫错误类型
///
/// 按故障级别分类：
/// - `Session` / `Extract`：局部故障，重试或降级，绝不终止进程
/// - `Storage`：持久化故障，致命，直接向上传播
#[derive(Debug)]
pub enum CrawlError {
    /// 浏览器会话相关错误（可重试）
    Session(SessionError),
    /// 持久化文件错误（致命）
    Storage(StorageError),
    /// 页面解析错误（软失败，当前页按零条记录处理）
    Extract(ExtractError),
}

impl CrawlError {
    /// 是否为致命错误（不可重试，必须传播到进程边界）
    pub fn is_fatal(&self) -> bool {
        matches!(self, CrawlError::Storage(_))
    }
}

impl fmt::Display for CrawlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrawlError::Session(e) => write!(f, "会话错误: {}", e),
            CrawlError::Storage(e) => write!(f, "存储错误: {}", e),
            CrawlError::Extract(e) => write!(f, "解析错误: {}", e),
        }
    }
}

impl std::error::Error for CrawlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CrawlError::Session(e) => Some(e),
            CrawlError::Storage(e) => Some(e),
            CrawlError::Extract(e) => Some(e),
        }
    }
}

impl From<SessionError> for CrawlError {
    fn from(err: SessionError) -> Self {
        CrawlError::Session(err)
    }
}

impl From<StorageError> for CrawlError {
    fn from(err: StorageError) -> Self {
        CrawlError::Storage(err)
    }
}

impl From<ExtractError> for CrawlError {
    fn from(err: ExtractError) -> Self {
        CrawlError::Extract(err)
    }
}

/// 浏览器会话错误
#[derive(Debug)]
pub enum SessionError {
    /// 超时内未找到元素
    ElementNotFound {
        selector: String,
        description: String,
    },
    /// 元素操作失败（点击/输入）
    ActionFailed {
        action: String,
        selector: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 导航失败
    NavigationFailed {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 页面加载未完成
    LoadTimeout,
    /// 获取页面 HTML 失败
    HtmlUnavailable {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::ElementNotFound {
                selector,
                description,
            } => {
                write!(f, "{}未找到: {}", description, selector)
            }
            SessionError::ActionFailed {
                action,
                selector,
                source,
            } => {
                write!(f, "{}失败 ({}): {}", action, selector, source)
            }
            SessionError::NavigationFailed { url, source } => {
                write!(f, "导航到 {} 失败: {}", url, source)
            }
            SessionError::LoadTimeout => write!(f, "页面加载超时"),
            SessionError::HtmlUnavailable { source } => {
                write!(f, "获取页面HTML失败: {}", source)
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::ActionFailed { source, .. }
            | SessionError::NavigationFailed { source, .. }
            | SessionError::HtmlUnavailable { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

impl SessionError {
    /// 创建元素未找到错误
    pub fn not_found(selector: impl Into<String>, description: impl Into<String>) -> Self {
        SessionError::ElementNotFound {
            selector: selector.into(),
            description: description.into(),
        }
    }

    /// 创建操作失败错误
    pub fn action_failed(
        action: impl Into<String>,
        selector: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        SessionError::ActionFailed {
            action: action.into(),
            selector: selector.into(),
            source: Box::new(source),
        }
    }
}

/// 持久化文件错误
#[derive(Debug)]
pub enum StorageError {
    /// 读取文件失败
    ReadFailed { path: String, source: std::io::Error },
    /// 写入文件失败
    WriteFailed { path: String, source: std::io::Error },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
            StorageError::WriteFailed { path, source } => {
                write!(f, "写入文件失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::ReadFailed { source, .. } | StorageError::WriteFailed { source, .. } => {
                Some(source)
            }
        }
    }
}

impl StorageError {
    /// 创建读取错误
    pub fn read(path: impl Into<String>, source: std::io::Error) -> Self {
        StorageError::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// 创建写入错误
    pub fn write(path: impl Into<String>, source: std::io::Error) -> Self {
        StorageError::WriteFailed {
            path: path.into(),
            source,
        }
    }
}

/// 页面解析错误
#[derive(Debug)]
pub enum ExtractError {
    /// CSS 选择器本身非法
    BadSelector { selector: String, detail: String },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::BadSelector { selector, detail } => {
                write!(f, "选择器非法 ({}): {}", selector, detail)
            }
        }
    }
}

impl std::error::Error for ExtractError {}

/// 爬虫结果类型
pub type CrawlResult<T> = Result<T, CrawlError>;
