// ==========================================
// 车队燃油调拨系统 - 配置层
// ==========================================
// 职责: 路线与车队批次配置的只读快照
// 红线: 不读环境、不读存储; 快照由嵌入方逐调用传入
// ==========================================

pub mod route_config;
pub mod truck_batch;

pub use route_config::{RouteConfig, DEFAULT_TOTAL_LITERS};
pub use truck_batch::{BatchOverride, BatchTier, TruckBatchConfig, DEFAULT_EXTRA_FUEL};
