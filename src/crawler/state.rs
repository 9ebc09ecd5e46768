use std::collections::HashSet;

use crate::models::IpcCode;

/// 一次运行的显式爬取状态
///
/// 随控制器主循环逐项推进，开始时由检查点与队列重建，
/// 不作为常驻对象状态散落各处。
#[derive(Debug, Default)]
pub struct CrawlState {
    /// 正在处理的分类号
    pub current: Option<IpcCode>,
    /// 本轮已尝试过的分类号（含被放弃的，避免同轮内重复取出）
    pub attempted: HashSet<IpcCode>,
    /// 完成数
    pub completed: usize,
    /// 放弃数
    pub abandoned: usize,
    /// 已落盘页数
    pub pages_flushed: u64,
    /// 已写入记录数
    pub records_written: u64,
}

/// 单页游标：仅存活于一个分类号的翻页循环内，不持久化
#[derive(Debug, Clone, Copy)]
pub struct PageCursor {
    /// 当前页码（从 1 起）
    pub page_no: u32,
    /// 当前页提取到的记录数
    pub record_count: usize,
    /// 当前渲染中是否存在下一页按钮
    pub has_next: bool,
}

/// 单个分类号的处理结果
#[derive(Debug, Default, Clone, Copy)]
pub struct ItemOutcome {
    /// 走过的页数
    pub pages_walked: u32,
    /// 实际落盘的页数（续跑时小于走过的页数）
    pub pages_flushed: u32,
    /// 写入的记录数
    pub records: u64,
}
