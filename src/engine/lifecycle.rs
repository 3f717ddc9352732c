// ==========================================
// 车队燃油调拨系统 - 台账生命周期引擎
// ==========================================
// 职责: FuelRecord 状态机
//   创建(去程单) → 回程单应用 → 检查点履约转发 → 闭环判定 / 取消冻结
// 状态: LOCKED_PENDING_CONFIG / ACTIVE_GOING / ACTIVE_RETURNING
//       / COMPLETE(谓词) / CANCELLED(外部信号)
// 红线: apply_return_order 每台账至多一次, 重复投递必须显式拒绝;
//       original_going_from/to 创建后永不改写;
//       total_lts 只增不减
// 并发: 本引擎不加锁; find_open_going_record → apply_return_order
//       读改写对需由调用方按车序列化
// ==========================================

use crate::config::RouteConfig;
use crate::domain::fuel_record::{
    CancelledRecord, FuelRecord, GoingRecord, LockedRecord, RecordCore, ReturningRecord,
};
use crate::domain::order::DeliveryOrder;
use crate::domain::types::{CheckpointId, PendingConfigReason, RecordState};
use crate::engine::allocation::{AllocationCalculator, SECONDARY_YARD};
use crate::engine::error::LifecycleError;
use crate::engine::route_resolver::RouteConfigResolver;
use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ==========================================
// FuelRecordLifecycle - 生命周期引擎
// ==========================================
pub struct FuelRecordLifecycle {
    route_resolver: RouteConfigResolver,
    calculator: AllocationCalculator,
}

impl FuelRecordLifecycle {
    /// 构造函数
    pub fn new() -> Self {
        Self {
            route_resolver: RouteConfigResolver::new(),
            calculator: AllocationCalculator::new(),
        }
    }

    // ==========================================
    // 创建 (去程单)
    // ==========================================

    /// 由去程提货单创建台账
    ///
    /// # 规则
    /// - total/extra 任一缺失 → LOCKED_PENDING_CONFIG, 结余强制 0,
    ///   检查点一律初始化 0, lock_note 记录诊断 JSON
    /// - 两者齐备 → ACTIVE_GOING, 内嵌去程计划,
    ///   结余 = (总油量+补贴) - Σ|去程计划| (可为负, 属正常)
    /// - start 由装货点推导 (含 NDOLA → 次级场站, 否则主场站);
    ///   from/to = start/目的地; original_going_from/to 在此快照, 此后不再改写
    ///
    /// # 参数
    /// - `order`: 去程提货单 (IMPORT)
    /// - `loading_point`: 装货点 (调用方可能用清洗后的值覆盖单上原始值)
    /// - `total_lts`: 路线解析结果 (未命中传 None)
    /// - `extra`: 批次解析结果 (未命中传 None)
    #[instrument(skip(self, order), fields(do_no = %order.do_number, truck = %order.truck_no))]
    pub fn create_from_going_order(
        &self,
        order: &DeliveryOrder,
        loading_point: &str,
        total_lts: Option<f64>,
        extra: Option<f64>,
    ) -> FuelRecord {
        let start = derive_start_yard(loading_point);
        let destination = order.destination.trim().to_uppercase();

        let core = RecordCore {
            record_id: Uuid::new_v4(),
            truck_no: order.truck_no.trim().to_string(),
            going_do: order.do_number.clone(),
            order_date: order.date,
            start: start.clone(),
            from: start.clone(),
            to: destination.clone(),
            original_going_from: start.clone(),
            original_going_to: destination.clone(),
            checkpoints: Default::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        match PendingConfigReason::from_missing(total_lts.is_none(), extra.is_none()) {
            Some(reason) => {
                warn!(
                    record_id = %core.record_id,
                    reason = %reason,
                    "配置缺失, 台账以锁定态创建"
                );
                let lock_note = json!({
                    "reason": reason.as_str(),
                    "destination": destination.clone(),
                    "loading_point": loading_point,
                    "truck_no": core.truck_no.clone(),
                })
                .to_string();

                FuelRecord::LockedPendingConfig(LockedRecord {
                    core,
                    pending_reason: reason,
                    lock_note: Some(lock_note),
                })
            }
            None => {
                // 此分支下两个操作数必然存在
                let total = total_lts.unwrap_or_default();
                let extra = extra.unwrap_or_default();

                let going_plan = self.calculator.calculate_going(
                    &start,
                    &destination,
                    loading_point,
                    total,
                    extra,
                );
                let balance = self.calculator.calculate_balance(total, extra, &going_plan);

                info!(
                    record_id = %core.record_id,
                    total_lts = total,
                    extra,
                    balance,
                    "去程台账创建"
                );

                FuelRecord::ActiveGoing(GoingRecord {
                    core,
                    total_lts: total,
                    extra,
                    balance,
                    going_plan,
                })
            }
        }
    }

    // ==========================================
    // 回程单应用
    // ==========================================

    /// 应用回程提货单 (每台账至多一次)
    ///
    /// # 规则
    /// - required = 回程目的地路线解析总油量
    /// - delta = max(0, required - total_lts)  (总油量只增不减)
    /// - extra_add = 装货点附加(回程目的地) + 沿海集群附加(出发场站)
    /// - needed = delta + extra_add; total_lts += needed; balance += needed
    /// - from/to 反转 (from=回程目的地, to=出发场站); 原始去程快照不动
    /// - 内嵌回程计划; 回程检查点不预填, 结余不因回程计划扣减
    ///   (回程补给全部为付费采购, 结余在外部履约时逐笔扣减)
    ///
    /// # 错误
    /// - 已在回程/已有回程单 → ReturnAlreadyApplied (幂等性保护)
    /// - 锁定态 → ReturnOnLockedRecord
    /// - 已取消 → RecordCancelled
    #[instrument(skip(self, record, return_order, config), fields(do_no = %return_order.do_number))]
    pub fn apply_return_order(
        &self,
        record: FuelRecord,
        return_order: &DeliveryOrder,
        config: &RouteConfig,
    ) -> Result<FuelRecord, LifecycleError> {
        match record {
            FuelRecord::ActiveGoing(going) => {
                let return_dest = return_order.destination.trim().to_uppercase();

                let required = self
                    .route_resolver
                    .resolve_total_liters(config, &return_dest)
                    .liters;
                let delta = (required - going.total_lts).max(0.0);
                let extra_add = self
                    .route_resolver
                    .resolve_loading_point_extra(config, &return_dest)
                    + self
                        .route_resolver
                        .resolve_destination_cluster_extra(config, &going.core.start);
                let additional_fuel_needed = delta + extra_add;

                let return_plan = self
                    .calculator
                    .calculate_return(config, &going.core.original_going_to);

                let mut core = going.core;
                core.from = return_dest;
                core.to = core.start.clone();
                core.updated_at = Utc::now();

                info!(
                    record_id = %core.record_id,
                    required,
                    delta,
                    extra_add,
                    additional_fuel_needed,
                    "回程单应用, 台账转入回程态"
                );

                Ok(FuelRecord::ActiveReturning(ReturningRecord {
                    total_lts: going.total_lts + additional_fuel_needed,
                    extra: going.extra,
                    balance: going.balance + additional_fuel_needed,
                    return_do: return_order.do_number.clone(),
                    going_plan: going.going_plan,
                    return_plan,
                    core,
                }))
            }
            FuelRecord::ActiveReturning(r) => Err(LifecycleError::ReturnAlreadyApplied {
                record_id: r.core.record_id,
                existing_return_do: r.return_do.clone(),
                incoming_do: return_order.do_number.clone(),
            }),
            FuelRecord::LockedPendingConfig(r) => Err(LifecycleError::ReturnOnLockedRecord {
                record_id: r.core.record_id,
                reason: r.pending_reason,
            }),
            FuelRecord::Cancelled(r) => Err(LifecycleError::RecordCancelled {
                record_id: r.core.record_id,
            }),
        }
    }

    // ==========================================
    // 检查点履约转发
    // ==========================================

    /// 登记外部检查点履约事件
    ///
    /// 本内核不执行采购履约, 仅接收外部事件转入台账:
    /// 检查点按增量累加, 结余按同一事件量扣减 ——
    /// 台账与结余对每一笔事件同步变化, 重复投递/分批履约/
    /// 负数冲账均不破坏 结余 = (总油量+补贴) - Σ加注 的对账恒等式
    ///
    /// # 错误
    /// - 锁定态 → FillOnLockedRecord (配置补齐前不应有履约)
    /// - 已取消 → RecordCancelled
    ///
    /// 闭环判定通过后履约仍被允许 (迟到的履约事件)
    pub fn record_checkpoint_fill(
        &self,
        record: &mut FuelRecord,
        checkpoint: CheckpointId,
        liters: f64,
    ) -> Result<(), LifecycleError> {
        match record {
            FuelRecord::ActiveGoing(r) => {
                r.core.checkpoints.add(checkpoint, liters);
                r.balance -= liters;
                r.core.updated_at = Utc::now();
                Ok(())
            }
            FuelRecord::ActiveReturning(r) => {
                r.core.checkpoints.add(checkpoint, liters);
                r.balance -= liters;
                r.core.updated_at = Utc::now();
                Ok(())
            }
            FuelRecord::LockedPendingConfig(r) => Err(LifecycleError::FillOnLockedRecord {
                record_id: r.core.record_id,
                reason: r.pending_reason,
            }),
            FuelRecord::Cancelled(r) => Err(LifecycleError::RecordCancelled {
                record_id: r.core.record_id,
            }),
        }
    }

    // ==========================================
    // 取消冻结
    // ==========================================

    /// 外部取消信号: 冻结台账为 CANCELLED 快照
    ///
    /// 取消后拒绝一切后续生命周期调用; 重复取消被拒绝
    pub fn cancel(&self, record: FuelRecord) -> Result<FuelRecord, LifecycleError> {
        let (mut core, state_at_cancel, total_lts, extra, balance, return_do) = match record {
            FuelRecord::Cancelled(r) => {
                return Err(LifecycleError::AlreadyCancelled {
                    record_id: r.core.record_id,
                });
            }
            FuelRecord::LockedPendingConfig(r) => {
                (r.core, RecordState::LockedPendingConfig, None, None, 0.0, None)
            }
            FuelRecord::ActiveGoing(r) => (
                r.core,
                RecordState::ActiveGoing,
                Some(r.total_lts),
                Some(r.extra),
                r.balance,
                None,
            ),
            FuelRecord::ActiveReturning(r) => (
                r.core,
                RecordState::ActiveReturning,
                Some(r.total_lts),
                Some(r.extra),
                r.balance,
                Some(r.return_do),
            ),
        };
        core.updated_at = Utc::now();

        info!(record_id = %core.record_id, from_state = %state_at_cancel, "台账取消冻结");

        Ok(FuelRecord::Cancelled(CancelledRecord {
            cancelled_at: core.updated_at,
            core,
            state_at_cancel,
            total_lts,
            extra,
            balance,
            return_do,
        }))
    }

    // ==========================================
    // 判定谓词
    // ==========================================

    /// 目的地对应的回程终点检查点
    ///
    /// 去程目的地属于沿海集群 → 卡皮里沿海站, 否则 → 菲森盖中途站
    pub fn terminal_checkpoint(&self, config: &RouteConfig, record: &FuelRecord) -> CheckpointId {
        if config.is_coastal(&record.core().original_going_to) {
            CheckpointId::KapiriCoastal
        } else {
            CheckpointId::FisengeMid
        }
    }

    /// 闭环判定
    ///
    /// # 规则
    /// 回程态 ∧ 结余归零 ∧ 终点检查点已加注非零
    ///
    /// 负结余明确不算闭环 —— 仍是进行中状态, 不是错误
    pub fn is_complete(&self, config: &RouteConfig, record: &FuelRecord) -> bool {
        if !matches!(record, FuelRecord::ActiveReturning(_)) {
            return false;
        }
        if record.balance() != 0.0 {
            return false;
        }
        let terminal = self.terminal_checkpoint(config, record);
        record.core().checkpoints.is_filled(terminal)
    }

    /// 是否仍在去程段
    ///
    /// 判据: 终点检查点尚未加注 —— 与是否已登记回程单无关
    /// (车辆可能在回程单补录前已实际返程)
    pub fn is_on_going_leg(&self, config: &RouteConfig, record: &FuelRecord) -> bool {
        let terminal = self.terminal_checkpoint(config, record);
        !record.core().checkpoints.is_filled(terminal)
    }

    /// 展示用状态 (闭环谓词命中时折算为 COMPLETE)
    pub fn display_state(&self, config: &RouteConfig, record: &FuelRecord) -> RecordState {
        if self.is_complete(config, record) {
            RecordState::Complete
        } else {
            record.state()
        }
    }

    // ==========================================
    // 台账检索
    // ==========================================

    /// 查找车辆最近一条未登记回程单的在途台账
    ///
    /// 回程 (EXPORT) 单据到达时, 调用方据此定位应挂接的台账;
    /// 返回 None 表示"无主回程单", 由调用方触发外部通知/人工挂接,
    /// 不是错误
    ///
    /// # 规则
    /// - 车牌号归一化 (去空白+大写) 后精确比对
    /// - 排除已取消台账; 锁定台账视为在途 (等待补配置)
    /// - 多条命中取单据日期最近者
    pub fn find_open_going_record<'a>(
        &self,
        truck_no: &str,
        records: &'a [FuelRecord],
    ) -> Option<&'a FuelRecord> {
        let wanted = truck_no.trim().to_uppercase();
        if wanted.is_empty() {
            return None;
        }

        records
            .iter()
            .filter(|r| !r.is_cancelled())
            .filter(|r| r.return_do().is_none())
            .filter(|r| r.truck_no().trim().to_uppercase() == wanted)
            .max_by_key(|r| r.core().order_date)
    }
}

impl Default for FuelRecordLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// 由装货点推导出发场站
///
/// 含 NDOLA → 次级场站 (触发场站间转运), 否则主场站
fn derive_start_yard(loading_point: &str) -> String {
    let lp = loading_point.trim().to_uppercase();
    if lp.contains(SECONDARY_YARD) {
        SECONDARY_YARD.to_string()
    } else {
        crate::engine::allocation::PRIMARY_YARD.to_string()
    }
}
