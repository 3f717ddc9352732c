// ==========================================
// 车队燃油调拨系统 - 引擎层
// ==========================================
// 职责: 实现燃油调拨业务规则, 全部为无状态纯引擎
// 红线: 引擎不做 I/O, 配置快照逐调用显式传入;
//       解析未命中输出 matched=false, 不抛错
// ==========================================

pub mod allocation;
pub mod error;
pub mod lifecycle;
pub mod lpo;
pub mod route_resolver;
pub mod similarity;
pub mod truck_resolver;

// 重导出核心引擎
pub use allocation::AllocationCalculator;
pub use error::LifecycleError;
pub use lifecycle::FuelRecordLifecycle;
pub use lpo::LpoAdvisoryEngine;
pub use route_resolver::{RouteConfigResolver, RouteMatch, RouteSuggestion};
pub use truck_resolver::{ExtraFuelMatch, TruckBatchResolver};
