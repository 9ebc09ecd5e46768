//! 持久化层
//!
//! 四个文件各司其职，均由控制器独占读写：
//! - `queue` - 待处理 IPC 队列（有序，一行一个）
//! - `checkpoint` - 追加式检查点日志（最后一行 = 最近一次尝试）
//! - `progress` - 当前工作项已落盘页码（断点续跑去重用）
//! - `dataset` - CSV 数据集（只追加，从不去重）
//!
//! 本层任何 I/O 错误都是致命的 `StorageError`，向进程边界传播。

pub mod checkpoint;
pub mod dataset;
pub mod progress;
pub mod queue;

pub use checkpoint::CheckpointLog;
pub use dataset::DatasetWriter;
pub use progress::PageProgress;
pub use queue::WorkQueue;
