// ==========================================
// 车队燃油调拨系统 - 核心库
// ==========================================
// 系统定位: 纯计算内核 (调拨建议, 人工最终控制权)
// 红线: 无持久化、无 I/O、无全局可变状态
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 路线/车队批次配置快照
pub mod config;

// 引擎层 - 业务规则
pub mod engine;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    CheckpointId, DoType, MatchType, PendingConfigReason, RecordState, TradeDirection,
};

// 领域实体
pub use domain::{
    AllocationPlan, CancelledRecord, CheckpointLedger, DeliveryOrder, FuelRecord, GoingRecord,
    LockedRecord, LpoAdvisory, RecordCore, ReturningRecord,
};

// 配置快照
pub use config::{BatchTier, RouteConfig, TruckBatchConfig};

// 引擎
pub use engine::{
    AllocationCalculator, ExtraFuelMatch, FuelRecordLifecycle, LifecycleError, LpoAdvisoryEngine,
    RouteConfigResolver, RouteMatch, RouteSuggestion, TruckBatchResolver,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "车队燃油调拨系统";
