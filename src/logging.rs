// ==========================================
// 车队燃油调拨系统 - 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 引擎层只打 tracing 事件, 订阅器由嵌入方或测试初始化
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日志系统 (嵌入方在进程入口调用一次)
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器 (默认: info)
///   例如: RUST_LOG=debug 或 RUST_LOG=fleet_fuel_engine=trace
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// 初始化测试环境的日志系统
///
/// debug 级别输出解析/调拨/状态流转的决策日志;
/// try_init 允许同一测试进程内的多个用例重复调用
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("fleet_fuel_engine=debug"))
        .with_test_writer()
        .try_init();
}
