//! 爬取编排层
//!
//! ## 状态机
//!
//! ```text
//! SEARCHING ──检索发出、页面加载确认──▶ EXTRACTING
//! EXTRACTING ──当前页已落盘（零条也算）──▶ ADVANCING
//! ADVANCING ──下一页按钮存在，点击并等加载──▶ EXTRACTING
//! ADVANCING ──下一页按钮不存在──▶ ITEM_DONE
//! ITEM_DONE ──队列还有待处理项──▶ SEARCHING
//! ITEM_DONE ──无候选项──▶ QUEUE_EMPTY（终止）
//! ```
//!
//! ## 层次关系
//!
//! ```text
//! controller (消费队列，驱动单个分类号的检索与翻页)
//!     ↓
//! session (会话能力：导航 / 点击 / 输入 / 等待)
//! extract (纯函数：HTML → 记录)
//! storage (队列 / 检查点 / 进度 / 数据集)
//! ```
//!
//! ## 故障边界
//!
//! 单个分类号内的故障（元素未找到、加载超时）重试后放弃该分类号，
//! 绝不越过控制器的单项边界；只有存储层故障向进程边界传播。

pub mod controller;
pub mod state;

pub use controller::CrawlController;
pub use state::{CrawlState, ItemOutcome, PageCursor};
