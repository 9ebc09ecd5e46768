use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

use crate::error::{CrawlError, CrawlResult};

/// 统一重试策略
///
/// 对外部易失败动作（定位元素、点击、输入、等待加载）施加固定的
/// 尝试预算与间隔。致命错误（存储 I/O）不重试，立即上抛；
/// 可重试错误耗尽预算后上抛最后一次的错误。
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// 尝试次数上限（含首次）
    pub attempts: usize,
    /// 两次尝试之间的等待
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: usize, delay: Duration) -> Self {
        Self { attempts, delay }
    }

    /// 按策略执行动作
    ///
    /// `action` 仅用于日志描述，如"点击下一页按钮"。
    pub async fn run<T, F, Fut>(&self, action: &str, mut op: F) -> CrawlResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = CrawlResult<T>>,
    {
        let mut last_err: Option<CrawlError> = None;

        for attempt in 1..=self.attempts.max(1) {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    if attempt < self.attempts {
                        warn!(
                            "{} 第 {}/{} 次尝试失败: {}，{}s 后重试",
                            action,
                            attempt,
                            self.attempts,
                            e,
                            self.delay.as_secs_f32()
                        );
                        sleep(self.delay).await;
                    }
                    last_err = Some(e);
                }
            }
        }

        // attempts >= 1，走到这里必然留有最后一次的错误
        Err(last_err.unwrap_or(CrawlError::Session(
            crate::error::SessionError::LoadTimeout,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SessionError, StorageError};
    use std::cell::Cell;

    fn transient() -> CrawlError {
        CrawlError::Session(SessionError::not_found("#btn", "测试按钮"))
    }

    fn fatal() -> CrawlError {
        CrawlError::Storage(StorageError::read(
            "queue.txt",
            std::io::Error::new(std::io::ErrorKind::Other, "disk"),
        ))
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let policy = RetryPolicy::new(3, Duration::ZERO);
        let calls = Cell::new(0usize);
        let result = policy
            .run("测试动作", || {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move {
                    if n < 3 {
                        Err(transient())
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;
        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_returns_last_error() {
        let policy = RetryPolicy::new(3, Duration::ZERO);
        let calls = Cell::new(0usize);
        let result: CrawlResult<()> = policy
            .run("测试动作", || {
                calls.set(calls.get() + 1);
                async { Err(transient()) }
            })
            .await;
        assert!(matches!(result, Err(CrawlError::Session(_))));
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_fatal_error_short_circuits() {
        let policy = RetryPolicy::new(3, Duration::ZERO);
        let calls = Cell::new(0usize);
        let result: CrawlResult<()> = policy
            .run("测试动作", || {
                calls.set(calls.get() + 1);
                async { Err(fatal()) }
            })
            .await;
        assert!(matches!(result, Err(CrawlError::Storage(_))));
        assert_eq!(calls.get(), 1);
    }
}
