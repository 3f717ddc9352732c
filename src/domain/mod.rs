// ==========================================
// 车队燃油调拨系统 - 领域层
// ==========================================
// 职责: 实体定义与封闭类型词汇表
// 红线: 领域层不含业务规则, 规则在 engine 层
// ==========================================

pub mod fuel_record;
pub mod lpo;
pub mod order;
pub mod types;

// 重导出领域实体
pub use fuel_record::{
    AllocationPlan, CancelledRecord, CheckpointLedger, FuelRecord, GoingRecord, LockedRecord,
    RecordCore, ReturningRecord,
};
pub use lpo::LpoAdvisory;
pub use order::DeliveryOrder;
