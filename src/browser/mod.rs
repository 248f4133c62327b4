//! 浏览器获取
//!
//! 两种方式拿到 (Browser, Page)：
//! - `headless` - 自启无头浏览器，可指定 Edge / Chrome 可执行文件
//! - `connection` - 连接已运行浏览器的调试端口
//!
//! 由配置的 `browser_debug_port` 决定走哪条路。

pub mod connection;
pub mod headless;

pub use connection::connect_to_browser_and_page;
pub use headless::launch_headless_browser;
