//! 日志初始化

use tracing::Level;

use crate::env::{core::LogLevel, EnvVar};

/// 解析日志级别，无法识别时使用 `info`
pub fn parse_level(value: &str) -> Level {
    value.trim().parse().unwrap_or(Level::INFO)
}

/// 安装输出到 stderr 的 fmt 日志订阅器，级别取自 `PORTAL_LOG_LEVEL`
///
/// 重复调用不会报错，已有订阅器时保持不变。
pub fn init_tracing() {
    let level = parse_level(&LogLevel::get_or_default("info".to_string()));

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
