//! 数据模型

pub mod ipc;
pub mod record;

pub use ipc::IpcCode;
pub use record::PatentRecord;
