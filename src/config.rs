use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

/// 程序配置
///
/// 优先级：环境变量 > `wipo_crawler.toml` > 默认值
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 检索入口页
    pub start_url: String,
    /// IPC 队列文件
    pub queue_file: String,
    /// 检查点日志文件
    pub checkpoint_file: String,
    /// 翻页进度文件
    pub progress_file: String,
    /// CSV 数据集文件
    pub data_file: String,
    /// 是否自行启动无头浏览器（否则连接调试端口）
    pub use_headless: bool,
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 浏览器可执行文件路径（无头模式可选）
    pub chrome_executable: Option<String>,
    /// 单个动作的尝试次数上限
    pub max_retries: usize,
    /// 元素定位 / 页面加载超时（秒）
    pub page_load_timeout_secs: u64,
    /// 元素存在性探测超时（秒），用于末页探测下一页按钮
    pub element_probe_timeout_secs: u64,
    /// 点击类动作的重试间隔（秒）
    pub click_retry_delay_secs: u64,
    /// 输入类动作的重试间隔（秒）
    pub input_retry_delay_secs: u64,
    /// 导航信号后的安定等待（毫秒），容忍结果表异步重绘
    pub settle_delay_ms: u64,
    /// 每页结果数
    pub page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_url: "https://patentscope.wipo.int/search/zh/search.jsf".to_string(),
            queue_file: "wipo_ipcs_list.txt".to_string(),
            checkpoint_file: "wipo_checkpoint.log".to_string(),
            progress_file: "wipo_progress.txt".to_string(),
            data_file: "wipo_data.csv".to_string(),
            use_headless: false,
            browser_debug_port: 9222,
            chrome_executable: None,
            max_retries: 3,
            page_load_timeout_secs: 15,
            element_probe_timeout_secs: 5,
            click_retry_delay_secs: 5,
            input_retry_delay_secs: 10,
            settle_delay_ms: 1500,
            page_size: 200,
        }
    }
}

/// 配置文件名
const CONFIG_FILE: &str = "wipo_crawler.toml";

impl Config {
    /// 加载配置：配置文件打底，环境变量覆盖
    pub fn load() -> Self {
        let base = match std::fs::read_to_string(CONFIG_FILE) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => config,
                Err(e) => {
                    warn!("配置文件 {} 解析失败，使用默认配置: {}", CONFIG_FILE, e);
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        };
        base.apply_env()
    }

    /// 用环境变量覆盖已有配置
    fn apply_env(self) -> Self {
        Self {
            start_url: std::env::var("WIPO_START_URL").unwrap_or(self.start_url),
            queue_file: std::env::var("WIPO_QUEUE_FILE").unwrap_or(self.queue_file),
            checkpoint_file: std::env::var("WIPO_CHECKPOINT_FILE").unwrap_or(self.checkpoint_file),
            progress_file: std::env::var("WIPO_PROGRESS_FILE").unwrap_or(self.progress_file),
            data_file: std::env::var("WIPO_DATA_FILE").unwrap_or(self.data_file),
            use_headless: std::env::var("WIPO_USE_HEADLESS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.use_headless),
            browser_debug_port: std::env::var("WIPO_BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(self.browser_debug_port),
            chrome_executable: std::env::var("WIPO_CHROME_EXECUTABLE").ok().or(self.chrome_executable),
            max_retries: std::env::var("WIPO_MAX_RETRIES").ok().and_then(|v| v.parse().ok()).unwrap_or(self.max_retries),
            page_load_timeout_secs: std::env::var("WIPO_PAGE_LOAD_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.page_load_timeout_secs),
            element_probe_timeout_secs: std::env::var("WIPO_ELEMENT_PROBE_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.element_probe_timeout_secs),
            click_retry_delay_secs: std::env::var("WIPO_CLICK_RETRY_DELAY_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.click_retry_delay_secs),
            input_retry_delay_secs: std::env::var("WIPO_INPUT_RETRY_DELAY_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.input_retry_delay_secs),
            settle_delay_ms: std::env::var("WIPO_SETTLE_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.settle_delay_ms),
            page_size: std::env::var("WIPO_PAGE_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(self.page_size),
        }
    }

    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    pub fn element_probe_timeout(&self) -> Duration {
        Duration::from_secs(self.element_probe_timeout_secs)
    }

    pub fn click_retry_delay(&self) -> Duration {
        Duration::from_secs(self.click_retry_delay_secs)
    }

    pub fn input_retry_delay(&self) -> Duration {
        Duration::from_secs(self.input_retry_delay_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}
