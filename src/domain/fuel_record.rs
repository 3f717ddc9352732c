// ==========================================
// 车队燃油调拨系统 - 燃油台账领域模型
// ==========================================
// FuelRecord = 一辆车一次去程+回程往返的燃油台账
// 红线: 按生命周期状态建模为带标签变体,
//       非法字段组合不可表达 (锁定态没有油量字段)
// 红线: original_going_from/to 创建后永不改写 (审计快照)
// ==========================================

use crate::domain::types::{CheckpointId, PendingConfigReason, RecordState};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// AllocationPlan - 单程调拨计划
// ==========================================
// 检查点 → 升数 的有序映射, 顺序即行程顺序
// 永不单独持久化, 始终内嵌在 FuelRecord 中
// 符号约定: 计划值为正数升数 (见 AllocationCalculator::calculate_balance)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    entries: Vec<(CheckpointId, f64)>,
}

impl AllocationPlan {
    /// 创建空计划
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// 追加一个检查点调拨量
    pub fn push(&mut self, checkpoint: CheckpointId, liters: f64) {
        self.entries.push((checkpoint, liters));
    }

    /// 查询某检查点的计划量
    pub fn get(&self, checkpoint: CheckpointId) -> Option<f64> {
        self.entries
            .iter()
            .find(|(c, _)| *c == checkpoint)
            .map(|(_, l)| *l)
    }

    /// 按行程顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &(CheckpointId, f64)> {
        self.entries.iter()
    }

    /// 计划量绝对值之和
    ///
    /// 旧台账以负数记录消耗, 迁移数据可能混入负值,
    /// 结余公式必须按绝对值累加以保持可审计
    pub fn total_abs(&self) -> f64 {
        self.entries.iter().map(|(_, l)| l.abs()).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ==========================================
// CheckpointLedger - 检查点加注台账
// ==========================================
// 12 个固定字段, 全部默认 0, 仅由外部 LPO 履约事件抬升
// 无论台账锁定与否, 检查点一律初始化为 0
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckpointLedger {
    pub ndola_transfer: f64,     // 恩多拉转运
    pub kitwe_yard: f64,         // 基特韦主场站
    pub garneton_yard: f64,      // 加内顿备用场站
    pub acacia_station: f64,     // Acacia 付费油站
    pub chingola_mid: f64,       // 钦戈拉中途
    pub congo_final: f64,        // 刚果末段
    pub kasumbalesa_border: f64, // 卡孙巴莱萨口岸
    pub whitehouse: f64,         // Whitehouse 油站
    pub golden: f64,             // Golden 油站
    pub fisenge_mid: f64,        // 菲森盖回程中途
    pub mpika_coastal: f64,      // 姆皮卡沿海线
    pub kapiri_coastal: f64,     // 卡皮里沿海线
}

impl CheckpointLedger {
    /// 按检查点读取加注量
    pub fn get(&self, checkpoint: CheckpointId) -> f64 {
        match checkpoint {
            CheckpointId::NdolaTransfer => self.ndola_transfer,
            CheckpointId::KitweYard => self.kitwe_yard,
            CheckpointId::GarnetonYard => self.garneton_yard,
            CheckpointId::AcaciaStation => self.acacia_station,
            CheckpointId::ChingolaMid => self.chingola_mid,
            CheckpointId::CongoFinal => self.congo_final,
            CheckpointId::KasumbalesaBorder => self.kasumbalesa_border,
            CheckpointId::Whitehouse => self.whitehouse,
            CheckpointId::Golden => self.golden,
            CheckpointId::FisengeMid => self.fisenge_mid,
            CheckpointId::MpikaCoastal => self.mpika_coastal,
            CheckpointId::KapiriCoastal => self.kapiri_coastal,
        }
    }

    /// 按检查点写入加注量 (仅供生命周期引擎转发外部履约事件)
    pub fn set(&mut self, checkpoint: CheckpointId, liters: f64) {
        match checkpoint {
            CheckpointId::NdolaTransfer => self.ndola_transfer = liters,
            CheckpointId::KitweYard => self.kitwe_yard = liters,
            CheckpointId::GarnetonYard => self.garneton_yard = liters,
            CheckpointId::AcaciaStation => self.acacia_station = liters,
            CheckpointId::ChingolaMid => self.chingola_mid = liters,
            CheckpointId::CongoFinal => self.congo_final = liters,
            CheckpointId::KasumbalesaBorder => self.kasumbalesa_border = liters,
            CheckpointId::Whitehouse => self.whitehouse = liters,
            CheckpointId::Golden => self.golden = liters,
            CheckpointId::FisengeMid => self.fisenge_mid = liters,
            CheckpointId::MpikaCoastal => self.mpika_coastal = liters,
            CheckpointId::KapiriCoastal => self.kapiri_coastal = liters,
        }
    }

    /// 按检查点累加加注量
    ///
    /// 履约事件按增量累加: 同一检查点的分批履约、重复投递
    /// 与负数冲账都落在同一字段上, 台账恒等于事件之和
    pub fn add(&mut self, checkpoint: CheckpointId, liters: f64) {
        self.set(checkpoint, self.get(checkpoint) + liters);
    }

    /// 检查点是否已加注 (非零即视为已履约)
    pub fn is_filled(&self, checkpoint: CheckpointId) -> bool {
        self.get(checkpoint) != 0.0
    }
}

// ==========================================
// RecordCore - 各状态共享的台账主干
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordCore {
    pub record_id: Uuid,              // 台账ID
    pub truck_no: String,             // 车牌号
    pub going_do: String,             // 去程提货单号
    pub order_date: NaiveDate,        // 去程单据日期 (find_open_going_record 排序键)
    pub start: String,                // 出发场站
    pub from: String,                 // 当前段起点 (回程时被反转)
    pub to: String,                   // 当前段终点 (回程时被反转)
    pub original_going_from: String,  // 去程起点快照 (创建后不可改写)
    pub original_going_to: String,    // 去程终点快照 (创建后不可改写)
    pub checkpoints: CheckpointLedger, // 检查点加注台账
    pub created_at: DateTime<Utc>,    // 创建时间
    pub updated_at: DateTime<Utc>,    // 最近变更时间
}

// ==========================================
// 状态变体
// ==========================================

/// 锁定台账 - 路线或批次配置缺失
///
/// 不携带油量字段: 总量/补贴在该状态下无意义, 结余强制为 0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockedRecord {
    pub core: RecordCore,
    pub pending_reason: PendingConfigReason, // 缺失原因
    pub lock_note: Option<String>,           // 诊断信息 (JSON, 供人工补配置)
}

/// 去程台账
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoingRecord {
    pub core: RecordCore,
    pub total_lts: f64,            // 路线配置总油量
    pub extra: f64,                // 批次补贴油量
    pub balance: f64,              // 运行结余 (计划调拨后可为负, 属正常)
    pub going_plan: AllocationPlan, // 去程调拨计划
}

/// 回程台账
///
/// COMPLETE 不是独立变体: 闭环是对本变体的判定谓词
/// (结余归零 + 终点检查点已加注), 判定后检查点仍可外部履约
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturningRecord {
    pub core: RecordCore,
    pub total_lts: f64,              // 累计总油量 (只增不减)
    pub extra: f64,                  // 批次补贴油量
    pub balance: f64,                // 运行结余
    pub return_do: String,           // 回程提货单号
    pub going_plan: AllocationPlan,  // 去程调拨计划 (审计保留)
    pub return_plan: AllocationPlan, // 回程调拨计划
}

/// 已取消台账 - 外部取消信号后的冻结快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelledRecord {
    pub core: RecordCore,
    pub state_at_cancel: RecordState,  // 取消时所处状态
    pub total_lts: Option<f64>,        // 取消时总油量 (锁定态为 None)
    pub extra: Option<f64>,            // 取消时补贴 (锁定态为 None)
    pub balance: f64,                  // 取消时结余
    pub return_do: Option<String>,     // 取消时回程单号
    pub cancelled_at: DateTime<Utc>,   // 取消时间
}

// ==========================================
// FuelRecord - 台账聚合
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelRecord {
    LockedPendingConfig(LockedRecord),
    ActiveGoing(GoingRecord),
    ActiveReturning(ReturningRecord),
    Cancelled(CancelledRecord),
}

impl FuelRecord {
    /// 共享主干 (只读)
    pub fn core(&self) -> &RecordCore {
        match self {
            FuelRecord::LockedPendingConfig(r) => &r.core,
            FuelRecord::ActiveGoing(r) => &r.core,
            FuelRecord::ActiveReturning(r) => &r.core,
            FuelRecord::Cancelled(r) => &r.core,
        }
    }

    /// 当前状态 (COMPLETE 由 is_complete 谓词判定, 不在此返回)
    pub fn state(&self) -> RecordState {
        match self {
            FuelRecord::LockedPendingConfig(_) => RecordState::LockedPendingConfig,
            FuelRecord::ActiveGoing(_) => RecordState::ActiveGoing,
            FuelRecord::ActiveReturning(_) => RecordState::ActiveReturning,
            FuelRecord::Cancelled(_) => RecordState::Cancelled,
        }
    }

    pub fn truck_no(&self) -> &str {
        &self.core().truck_no
    }

    pub fn going_do(&self) -> &str {
        &self.core().going_do
    }

    /// 回程提货单号 (回程开始前为 None)
    pub fn return_do(&self) -> Option<&str> {
        match self {
            FuelRecord::ActiveReturning(r) => Some(&r.return_do),
            FuelRecord::Cancelled(r) => r.return_do.as_deref(),
            _ => None,
        }
    }

    /// 总油量 (锁定态为 None)
    pub fn total_lts(&self) -> Option<f64> {
        match self {
            FuelRecord::LockedPendingConfig(_) => None,
            FuelRecord::ActiveGoing(r) => Some(r.total_lts),
            FuelRecord::ActiveReturning(r) => Some(r.total_lts),
            FuelRecord::Cancelled(r) => r.total_lts,
        }
    }

    /// 批次补贴 (锁定态为 None)
    pub fn extra(&self) -> Option<f64> {
        match self {
            FuelRecord::LockedPendingConfig(_) => None,
            FuelRecord::ActiveGoing(r) => Some(r.extra),
            FuelRecord::ActiveReturning(r) => Some(r.extra),
            FuelRecord::Cancelled(r) => r.extra,
        }
    }

    /// 运行结余 (锁定态强制为 0)
    pub fn balance(&self) -> f64 {
        match self {
            FuelRecord::LockedPendingConfig(_) => 0.0,
            FuelRecord::ActiveGoing(r) => r.balance,
            FuelRecord::ActiveReturning(r) => r.balance,
            FuelRecord::Cancelled(r) => r.balance,
        }
    }

    /// 是否锁定态
    pub fn is_locked(&self) -> bool {
        matches!(self, FuelRecord::LockedPendingConfig(_))
    }

    /// 是否已取消
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FuelRecord::Cancelled(_))
    }

    /// 检查点加注台账
    pub fn checkpoints(&self) -> &CheckpointLedger {
        &self.core().checkpoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_ledger_defaults_to_zero() {
        let ledger = CheckpointLedger::default();
        for cp in CheckpointId::ALL {
            assert_eq!(ledger.get(cp), 0.0);
            assert!(!ledger.is_filled(cp));
        }
    }

    #[test]
    fn test_checkpoint_ledger_set_get_roundtrip() {
        let mut ledger = CheckpointLedger::default();
        ledger.set(CheckpointId::Whitehouse, 250.0);
        assert_eq!(ledger.get(CheckpointId::Whitehouse), 250.0);
        assert!(ledger.is_filled(CheckpointId::Whitehouse));
        // 其余检查点不受影响
        assert_eq!(ledger.get(CheckpointId::Golden), 0.0);
    }

    #[test]
    fn test_checkpoint_ledger_add_accumulates() {
        let mut ledger = CheckpointLedger::default();
        ledger.add(CheckpointId::KasumbalesaBorder, 60.0);
        ledger.add(CheckpointId::KasumbalesaBorder, 40.0);
        assert_eq!(ledger.get(CheckpointId::KasumbalesaBorder), 100.0);
        // 负数冲账同样按增量落账
        ledger.add(CheckpointId::KasumbalesaBorder, -100.0);
        assert!(!ledger.is_filled(CheckpointId::KasumbalesaBorder));
    }

    #[test]
    fn test_plan_total_abs_handles_legacy_negatives() {
        let mut plan = AllocationPlan::new();
        plan.push(CheckpointId::KitweYard, 550.0);
        plan.push(CheckpointId::ChingolaMid, -450.0); // 迁移数据的负数消耗
        assert_eq!(plan.total_abs(), 1000.0);
    }

    #[test]
    fn test_plan_preserves_route_order() {
        let mut plan = AllocationPlan::new();
        plan.push(CheckpointId::Whitehouse, 250.0);
        plan.push(CheckpointId::Golden, 150.0);
        let order: Vec<_> = plan.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, vec![CheckpointId::Whitehouse, CheckpointId::Golden]);
    }
}
