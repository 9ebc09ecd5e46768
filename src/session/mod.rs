//! 浏览器会话层 - 基础设施
//!
//! `SessionDriver` 定义控制器可用的全部会话能力；
//! `ChromiumDriver` 是持有 Page 的生产实现。
//! 会话层不认识队列、检查点与数据集。

pub mod chromium;
pub mod driver;

pub use chromium::ChromiumDriver;
pub use driver::SessionDriver;
