//! 日志初始化

use tracing_subscriber::EnvFilter;

/// 初始化全局日志
///
/// 默认 info 级别，可用 RUST_LOG 环境变量调整（如 RUST_LOG=debug）。
/// 重复调用不报错，测试场景下可以放心使用。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
