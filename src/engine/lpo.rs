// ==========================================
// 车队燃油调拨系统 - LPO 建议引擎
// ==========================================
// 职责: 从调拨计划推导付费油站采购建议
// 规则: 公司场站提油 (转运/标准/备用) 永不生成建议;
//       去程仅"付费油站提油"一档生成 (中途/末段为公司代投, 不外购);
//       回程全部补给点生成 (回程没有公司场站提油)
// 红线: 纯函数, 无副作用; 实际开单/履约由外部采购流程决定
// ==========================================

use crate::domain::fuel_record::{AllocationPlan, FuelRecord};
use crate::domain::lpo::LpoAdvisory;
use crate::domain::types::CheckpointId;
use tracing::debug;

// ==========================================
// LpoAdvisoryEngine - LPO 建议引擎
// ==========================================
pub struct LpoAdvisoryEngine {
    // 无状态引擎
}

impl LpoAdvisoryEngine {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 推导付费油站采购建议
    ///
    /// # 规则
    /// - 回程段: 计划内每个补给点各生成一条建议
    ///   (入境双站拆分因此恒为两条建议, 永不合并)
    /// - 去程段: 仅付费油站提油档生成一条建议
    ///
    /// # 参数
    /// - `record`: 所属台账 (提供车牌/单号/当前段目的地)
    /// - `plan`: 单程调拨计划
    /// - `is_return_leg`: 是否回程段 (决定关联单号取回程单还是去程单)
    pub fn determine_lpos(
        &self,
        record: &FuelRecord,
        plan: &AllocationPlan,
        is_return_leg: bool,
    ) -> Vec<LpoAdvisory> {
        let do_no = if is_return_leg {
            record
                .return_do()
                .unwrap_or_else(|| record.going_do())
                .to_string()
        } else {
            record.going_do().to_string()
        };

        let advisories: Vec<LpoAdvisory> = plan
            .iter()
            .filter(|(checkpoint, _)| {
                if is_return_leg {
                    // 回程无公司场站提油, 全部外购
                    !checkpoint.is_company_yard()
                } else {
                    *checkpoint == CheckpointId::AcaciaStation
                }
            })
            .map(|(checkpoint, liters)| LpoAdvisory {
                station: checkpoint.station_name().to_string(),
                truck_no: record.truck_no().to_string(),
                do_no: do_no.clone(),
                liters: liters.abs(),
                destination: record.core().to.clone(),
                checkpoint: *checkpoint,
            })
            .collect();

        debug!(
            record_id = %record.core().record_id,
            is_return_leg,
            advisory_count = advisories.len(),
            "LPO 建议推导完成"
        );

        advisories
    }
}

impl Default for LpoAdvisoryEngine {
    fn default() -> Self {
        Self::new()
    }
}
