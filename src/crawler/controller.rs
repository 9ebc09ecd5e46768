//! 爬取控制器
//!
//! 队列 → 检索 → 翻页提取 → 检查点/数据集 的唯一编排者。
//! 队列、检查点、进度与数据集只由本控制器读写。

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{CrawlResult, StorageError};
use crate::extract::extract_records;
use crate::models::IpcCode;
use crate::retry::RetryPolicy;
use crate::session::SessionDriver;
use crate::storage::{CheckpointLog, DatasetWriter, PageProgress, WorkQueue};

use super::state::{CrawlState, ItemOutcome, PageCursor};

/// 分类检索模式按钮（入口页）
pub(crate) const CLASSIF_BUTTON: &str = r#"[value="CLASSIF"]"#;
/// 高级检索输入框
pub(crate) const SEARCH_INPUT: &str = "#advancedSearchForm\\:advancedSearchInput\\:input";
/// 检索提交按钮
pub(crate) const SEARCH_BUTTON: &str = "#advancedSearchForm\\:advancedSearchInput\\:buttons";
/// 下一页按钮
pub(crate) const NEXT_PAGE_BUTTON: &str = r#"a[aria-label="下一页"]"#;

/// 每页结果数下拉项
fn page_size_selector(page_size: u32) -> String {
    format!(r#"[value="{}"]"#, page_size)
}

/// 爬取控制器
///
/// 对会话驱动泛型化：生产环境注入 `ChromiumDriver`，
/// 测试注入脚本化的假驱动。
pub struct CrawlController<S: SessionDriver> {
    driver: S,
    queue: WorkQueue,
    checkpoint: CheckpointLog,
    progress: PageProgress,
    dataset: DatasetWriter,
    click_retry: RetryPolicy,
    input_retry: RetryPolicy,
    settle_delay: Duration,
    page_size: u32,
}

impl<S: SessionDriver> CrawlController<S> {
    pub fn new(
        driver: S,
        queue: WorkQueue,
        checkpoint: CheckpointLog,
        progress: PageProgress,
        dataset: DatasetWriter,
        config: &Config,
    ) -> Self {
        Self {
            driver,
            queue,
            checkpoint,
            progress,
            dataset,
            click_retry: RetryPolicy::new(config.max_retries, config.click_retry_delay()),
            input_retry: RetryPolicy::new(config.max_retries, config.input_retry_delay()),
            settle_delay: config.settle_delay(),
            page_size: config.page_size,
        }
    }

    /// 主循环：消费队列直至无候选项
    ///
    /// 返回本轮的最终爬取状态；只有存储故障会以 Err 离开本方法。
    pub async fn run(&self) -> CrawlResult<CrawlState> {
        let mut state = CrawlState::default();

        // 队列与检查点都为空：立即干净退出，不碰浏览器会话
        if self.queue.is_empty()? && self.checkpoint.is_empty()? {
            info!("队列与检查点均为空，没有待处理的IPC分类");
            return Ok(state);
        }

        // 进入分类检索模式（入口页只需一次）。
        // 进不去则本轮一项也做不了：队列原样留给下一轮，不算存储故障。
        if let Err(e) = self
            .click_retry
            .run("点击分类检索按钮", || async {
                Ok(self.driver.click(CLASSIF_BUTTON, "分类检索按钮").await?)
            })
            .await
        {
            error!("进入分类检索模式失败，本轮终止: {}", e);
            return Ok(state);
        }

        let mut at_start = true;
        loop {
            let candidate = self.next_item(&state, at_start)?;
            at_start = false;

            let Some(ipc) = candidate else {
                // QUEUE_EMPTY
                info!("✅ 所有IPC分类处理完成");
                break;
            };

            state.attempted.insert(ipc.clone());
            state.current = Some(ipc.clone());

            match self.process_item(&ipc).await {
                Ok(outcome) => {
                    // ITEM_DONE：检查点在检索发出时已写，这里只收队列与进度
                    self.queue.remove(&ipc)?;
                    self.progress.clear()?;
                    state.completed += 1;
                    state.pages_flushed += outcome.pages_flushed as u64;
                    state.records_written += outcome.records;
                    info!(
                        "✓ IPC {} 处理完成: {} 页 / {} 条记录",
                        ipc, outcome.pages_walked, outcome.records
                    );
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    // 单项边界：放弃该分类号，继续下一个
                    error!("IPC {} 处理失败，跳过: {}", ipc, e);
                    state.abandoned += 1;
                }
            }
            state.current = None;
        }

        Ok(state)
    }

    /// 选出下一个待处理分类号
    ///
    /// 启动时优先恢复检查点中最近一次尝试的分类号（仍在队列中或
    /// 留有翻页进度才视为未完成）；其后从队列头部取未尝试项，
    /// 上轮已处理但仍留在队列里的项防御性跳过并移除。
    fn next_item(&self, state: &CrawlState, at_start: bool) -> Result<Option<IpcCode>, StorageError> {
        if at_start {
            if let Some(last) = self.checkpoint.last()? {
                let unfinished = self.queue.contains(&last)?
                    || self.progress.flushed_pages_for(&last)? > 0;
                if unfinished {
                    info!("🔁 从检查点恢复在途IPC分类: {}", last);
                    return Ok(Some(last));
                }
                debug!("检查点末项 {} 已完成，从队列继续", last);
            }
        }

        for ipc in self.queue.items()? {
            if state.attempted.contains(&ipc) {
                continue;
            }
            if self.checkpoint.contains(&ipc)? {
                info!("IPC {} 已处理，跳过", ipc);
                self.queue.remove(&ipc)?;
                continue;
            }
            return Ok(Some(ipc));
        }
        Ok(None)
    }

    /// 处理单个分类号：检索 + 翻页到底
    async fn process_item(&self, ipc: &IpcCode) -> CrawlResult<ItemOutcome> {
        // 续跑时前若干页已落盘，翻页时只走不写
        let flushed_before = self.progress.flushed_pages_for(ipc)?;

        // SEARCHING
        self.issue_search(ipc).await?;

        // 检索已成功发出：此刻写检查点，而不是完成之后。
        // 新分类号先清掉旧进度，过期页码不能套到新项上。
        if !self.checkpoint.contains(ipc)? {
            self.progress.clear()?;
            self.checkpoint.append(ipc)?;
        }

        self.paginate(ipc, flushed_before).await
    }

    /// 发出分类检索（原子步骤各自带重试）
    async fn issue_search(&self, ipc: &IpcCode) -> CrawlResult<()> {
        info!("🔎 切换到新IPC分类: {}", ipc);
        let query = format!("IC:({})", ipc);

        self.input_retry
            .run("输入检索式", || async {
                Ok(self
                    .driver
                    .type_text(SEARCH_INPUT, &query, "检索输入框")
                    .await?)
            })
            .await?;

        self.click_retry
            .run("点击检索按钮", || async {
                Ok(self.driver.click(SEARCH_BUTTON, "检索按钮").await?)
            })
            .await?;

        // 设置每页显示数量
        let size_selector = page_size_selector(self.page_size);
        self.click_retry
            .run("点击分页下拉", || async {
                Ok(self.driver.click(&size_selector, "分页下拉").await?)
            })
            .await?;

        self.wait_settled().await
    }

    /// 翻页循环：EXTRACTING ↔ ADVANCING，直到下一页按钮消失
    async fn paginate(&self, ipc: &IpcCode, flushed_before: u32) -> CrawlResult<ItemOutcome> {
        if flushed_before > 0 {
            info!(
                "🔁 IPC {} 前 {} 页此前已落盘，续跑只翻不写",
                ipc, flushed_before
            );
        }

        let mut outcome = ItemOutcome::default();
        let mut page_no: u32 = 1;
        let mut consecutive_empty: u32 = 0;

        loop {
            // EXTRACTING
            let record_count = self
                .extract_current_page(ipc, page_no, flushed_before, &mut outcome)
                .await?;

            // ADVANCING
            let has_next = self.driver.find(NEXT_PAGE_BUTTON).await?;
            let cursor = PageCursor {
                page_no,
                record_count,
                has_next,
            };
            outcome.pages_walked += 1;

            if cursor.record_count == 0 {
                consecutive_empty += 1;
                if consecutive_empty >= 2 {
                    // 偶发一页空白可能是瞬时重绘，连续空白值得浮出
                    warn!(
                        "⚠️ IPC {} 连续 {} 页没有数据 (第 {} 页)",
                        ipc, consecutive_empty, cursor.page_no
                    );
                } else {
                    info!("当前页面没有数据 (IPC {} 第 {} 页)", ipc, cursor.page_no);
                }
            } else {
                consecutive_empty = 0;
            }

            if !cursor.has_next {
                // ITEM_DONE：下一页按钮缺席是结果尽头的权威信号
                info!("已到达最后一页 (IPC {}，共 {} 页)", ipc, cursor.page_no);
                break;
            }

            self.click_retry
                .run("点击下一页按钮", || async {
                    Ok(self.driver.click(NEXT_PAGE_BUTTON, "下一页按钮").await?)
                })
                .await?;
            self.wait_settled().await?;
            page_no += 1;
        }

        Ok(outcome)
    }

    /// 提取当前页并落盘；返回提取到的记录数
    ///
    /// 解析失败是软失败：记日志、按零条处理、继续翻页。
    async fn extract_current_page(
        &self,
        ipc: &IpcCode,
        page_no: u32,
        flushed_before: u32,
        outcome: &mut ItemOutcome,
    ) -> CrawlResult<usize> {
        let html = self.driver.current_html().await?;
        let records = match extract_records(&html) {
            Ok(records) => records,
            Err(e) => {
                error!("页面数据处理失败 (IPC {} 第 {} 页): {}", ipc, page_no, e);
                Vec::new()
            }
        };
        let record_count = records.len();

        if page_no > flushed_before {
            self.dataset.append(&records)?;
            self.progress.set(ipc, page_no)?;
            outcome.pages_flushed += 1;
            outcome.records += record_count as u64;
        } else {
            debug!(
                "第 {} 页此前已落盘，跳过写入 ({} 条)",
                page_no, record_count
            );
        }
        Ok(record_count)
    }

    /// 等待加载信号，再强制安定等待：导航事件之后结果表仍可能异步重绘
    ///
    /// 加载等待与点击、输入同属会话动作，瞬时超时同样吃重试预算。
    async fn wait_settled(&self) -> CrawlResult<()> {
        self.click_retry
            .run("等待页面加载", || async {
                Ok(self.driver.wait_for_load().await?)
            })
            .await?;
        sleep(self.settle_delay).await;
        Ok(())
    }
}
