//! 浏览器接入
//!
//! 两种接入方式，由配置选择：
//! - `connection` - 连接到已开启调试端口的浏览器
//! - `headless` - 自行启动无头浏览器

pub mod connection;
pub mod headless;

pub use connection::connect_to_browser_and_page;
pub use headless::launch_headless_browser;
