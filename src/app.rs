use anyhow::Result;
use chromiumoxide::Browser;
use tracing::{info, warn};

use crate::browser;
use crate::config::Config;
use crate::crawler::CrawlController;
use crate::session::ChromiumDriver;
use crate::storage::{CheckpointLog, DatasetWriter, PageProgress, WorkQueue};
use crate::utils::logging;

/// 应用主结构
///
/// 持有浏览器会话这一稀缺资源，保证每条退出路径
/// （正常完成、致命存储错误、用户中断）都执行会话释放。
pub struct App {
    config: Config,
    browser: Browser,
    controller: CrawlController<ChromiumDriver>,
}

impl App {
    /// 初始化应用：打开持久化文件，接入浏览器
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        let (browser, page) = if config.use_headless {
            browser::launch_headless_browser(&config.start_url, config.chrome_executable.as_deref())
                .await?
        } else {
            browser::connect_to_browser_and_page(config.browser_debug_port, &config.start_url)
                .await?
        };

        let driver = ChromiumDriver::new(
            page,
            config.page_load_timeout(),
            config.element_probe_timeout(),
        );
        let controller = CrawlController::new(
            driver,
            WorkQueue::open(&config.queue_file),
            CheckpointLog::open(&config.checkpoint_file),
            PageProgress::open(&config.progress_file),
            DatasetWriter::open(&config.data_file),
            &config,
        );

        Ok(Self {
            config,
            browser,
            controller,
        })
    }

    /// 运行主循环，直到队列耗尽、致命错误或用户中断
    pub async fn run(mut self) -> Result<()> {
        let result = tokio::select! {
            res = self.controller.run() => match res {
                Ok(state) => {
                    logging::print_final_stats(&state, &self.config);
                    Ok(())
                }
                Err(e) => Err(anyhow::Error::new(e)),
            },
            _ = tokio::signal::ctrl_c() => {
                info!("用户中断操作");
                Ok(())
            }
        };

        // 无论哪条路径都先释放浏览器会话
        self.shutdown().await;
        result
    }

    /// 释放浏览器会话
    ///
    /// 自行启动的无头浏览器整个关掉；外部浏览器只断开连接，
    /// 不替用户关闭。
    async fn shutdown(&mut self) {
        if self.config.use_headless {
            if let Err(e) = self.browser.close().await {
                warn!("关闭浏览器失败: {}", e);
            }
        } else {
            info!("断开浏览器连接");
        }
        info!("爬虫正常终止");
    }
}
