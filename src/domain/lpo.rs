// ==========================================
// 车队燃油调拨系统 - LPO 建议领域模型
// ==========================================
// LPO (本地采购单) 建议仅为输出值, 不是台账状态
// 实际开单与履约由外部采购流程决定
// ==========================================

use crate::domain::types::CheckpointId;
use serde::{Deserialize, Serialize};

// ==========================================
// LpoAdvisory - 付费油站采购建议
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpoAdvisory {
    pub station: String,           // 加油站名
    pub truck_no: String,          // 车牌号
    pub do_no: String,             // 关联提货单号
    pub liters: f64,               // 建议采购升数
    pub destination: String,       // 当前段目的地
    pub checkpoint: CheckpointId,  // 对应检查点
}
