//! 基础设施层（Infrastructure Layer）
//!
//! 持有稀缺资源（Page），只向上暴露浏览器操作能力：
//! - `PageDriver` - 能力抽象（导航 / 填充 / 点击 / 读取 / 等待）
//! - `DomDriver` - chromiumoxide 实现，唯一的 page owner
//!
//! 本层不认识考生、科目与流程。

pub mod dom_driver;
pub mod driver;

pub use dom_driver::DomDriver;
pub use driver::{ElementState, PageDriver};
