// ==========================================
// 车队燃油调拨系统 - 提货单领域模型
// ==========================================
// DeliveryOrder 由外部订单系统提供, 本内核视为不可变输入
// ==========================================

use crate::domain::types::{DoType, TradeDirection};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// DeliveryOrder - 提货单
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryOrder {
    pub do_number: String,          // 提货单号
    pub do_type: DoType,            // 单据类型 (DO/SDO)
    pub direction: TradeDirection,  // 贸易方向 (IMPORT=去程 / EXPORT=回程)
    pub truck_no: String,           // 车牌号 (末段为批次后缀)
    pub destination: String,        // 目的地
    pub loading_point: String,      // 装货点
    pub date: NaiveDate,            // 单据日期
}

impl DeliveryOrder {
    /// 是否去程单
    pub fn is_going(&self) -> bool {
        self.direction == TradeDirection::Import
    }

    /// 是否回程单
    pub fn is_return(&self) -> bool {
        self.direction == TradeDirection::Export
    }
}
