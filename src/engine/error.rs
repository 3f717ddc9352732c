// ==========================================
// 车队燃油调拨系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 解析未命中不是错误 (走 matched=false 通道);
//       错误仅用于被拒绝的生命周期调用
// ==========================================

use crate::domain::types::PendingConfigReason;
use thiserror::Error;
use uuid::Uuid;

/// 生命周期引擎错误类型
#[derive(Error, Debug)]
pub enum LifecycleError {
    // ===== 幂等性保护 =====
    #[error("回程单重复应用: 台账 {record_id} 已登记回程单 {existing_return_do}, 拒绝 {incoming_do}")]
    ReturnAlreadyApplied {
        record_id: Uuid,
        existing_return_do: String,
        incoming_do: String,
    },

    // ===== 状态保护 =====
    #[error("锁定台账不允许应用回程单: {record_id} (缺失原因: {reason})")]
    ReturnOnLockedRecord {
        record_id: Uuid,
        reason: PendingConfigReason,
    },

    #[error("锁定台账不允许登记检查点履约: {record_id} (缺失原因: {reason})")]
    FillOnLockedRecord {
        record_id: Uuid,
        reason: PendingConfigReason,
    },

    #[error("台账已取消, 拒绝一切生命周期调用: {record_id}")]
    RecordCancelled { record_id: Uuid },

    #[error("台账已处于取消状态, 重复取消被拒绝: {record_id}")]
    AlreadyCancelled { record_id: Uuid },

    // ===== 通用错误 =====
    /// 嵌入方扩展通道: 外层在生命周期调用链上包自有错误
    /// (持久化/通知等) 时经此透传, 内核自身不构造
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
