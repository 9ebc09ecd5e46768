//! # WIPO Crawler
//!
//! 可断点续跑的 WIPO Patentscope 专利分类爬虫
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层
//! - `browser/` - 浏览器接入（连接调试端口 / 启动无头）
//! - `session/` - 会话能力边界（`SessionDriver` trait 及 chromiumoxide 实现）
//!
//! ### ② 持久化层
//! - `storage/` - 队列、检查点、翻页进度、CSV 数据集，全部文件后备
//!
//! ### ③ 纯函数层
//! - `extract/` - 渲染后的结果页 HTML → 结构化专利记录
//!
//! ### ④ 编排层
//! - `crawler/` - 爬取控制器：消费队列、驱动检索与翻页、
//!   组合重试策略、维护检查点与续跑去重
//! - `app` - 应用生命周期（初始化 / 运行 / 会话释放）
//!
//! ## 故障语义
//!
//! - 会话故障：按预算重试，耗尽后放弃当前分类号，进程继续
//! - 解析故障：软失败，当前页按零条记录处理
//! - 存储故障：致命，传播到进程边界，非零退出
//! - 用户中断：干净退出，保证会话释放，退出码 0

pub mod app;
pub mod browser;
pub mod config;
pub mod crawler;
pub mod error;
pub mod extract;
pub mod models;
pub mod retry;
pub mod session;
pub mod storage;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use crawler::{CrawlController, CrawlState};
pub use error::{CrawlError, CrawlResult, SessionError, StorageError};
pub use models::{IpcCode, PatentRecord};
pub use retry::RetryPolicy;
pub use session::{ChromiumDriver, SessionDriver};
