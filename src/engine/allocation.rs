// ==========================================
// 车队燃油调拨系统 - 燃油调拨计算引擎
// ==========================================
// 职责: 按固定规则序列生成去程/回程调拨计划, 计算运行结余
// 规则: 去程四步顺序执行, 每步独立开关; 回程全部为固定常数
// 红线: 结余按绝对值累加 (旧台账负数消耗迁移数据仍可审计),
//       计划前结余为负属正常, 不是错误
// ==========================================

use crate::config::RouteConfig;
use crate::domain::fuel_record::AllocationPlan;
use crate::domain::types::CheckpointId;
use tracing::debug;

// ==========================================
// 场站与装货点
// ==========================================

/// 主场站 (基特韦)
pub const PRIMARY_YARD: &str = "KITWE";

/// 次级场站 (恩多拉) - 出发自此时先做场站间转运
pub const SECONDARY_YARD: &str = "NDOLA";

// ==========================================
// 去程固定量 (升)
// ==========================================

/// 次级场站 → 主场站 转运量
pub const SECONDARY_TRANSFER_LTS: f64 = 200.0;

/// 主场站标准提油量
pub const STANDARD_YARD_DRAW_LTS: f64 = 550.0;

/// 备用场站提油量
pub const ALTERNATE_YARD_DRAW_LTS: f64 = 600.0;

/// 付费提油基线: 付费油站提油量 = 总油量 - 基线
pub const PAID_STATION_BASELINE_LTS: f64 = 1850.0;

/// 中途固定补给量 (场站提油路径)
pub const MID_ROUTE_GOING_LTS: f64 = 450.0;

/// 付费提油路径下中途补给的调整常数:
/// 中途量 = (总油量 - 基线) - 本常数, 保持两条提油路径的累计量一致
pub const MID_ROUTE_PAID_ADJUST_LTS: f64 = 100.0;

/// 末段累计消耗常数: 末段补给 = (总油量 + 补贴) - 本常数
pub const FINAL_LEG_CONSUMPTION_LTS: f64 = 900.0;

/// 末段特例目的地 → 固定末段补给量 (无条件覆盖公式)
pub const SPECIAL_FINAL_LEG: [(&str, f64); 3] =
    [("LUSAKA", 60.0), ("LUANSHYA", 50.0), ("CHAMBISHI", 80.0)];

// ==========================================
// 回程固定量 (升)
// ==========================================

/// 过境补给量 (卡孙巴莱萨口岸)
pub const BORDER_CROSSING_LTS: f64 = 100.0;

/// 回程入境双站拆分: Whitehouse 站
pub const RETURN_ENTRY_WHITEHOUSE_LTS: f64 = 250.0;

/// 回程入境双站拆分: Golden 站
pub const RETURN_ENTRY_GOLDEN_LTS: f64 = 150.0;

/// 回程中途补给量 (菲森盖)
pub const MID_ROUTE_RETURN_LTS: f64 = 250.0;

/// 沿海线补给: 姆皮卡
pub const COASTAL_MPIKA_LTS: f64 = 300.0;

/// 沿海线补给: 卡皮里
pub const COASTAL_KAPIRI_LTS: f64 = 250.0;

// ==========================================
// 去程提油路径
// ==========================================

/// 去程主场站提油的三种互斥路径, 由装货点决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrawPath {
    Standard,    // 基特韦主场站标准提油
    Alternate,   // 加内顿备用场站提油
    PaidStation, // 付费油站提油 (生成 LPO)
}

/// 按装货点判定提油路径
///
/// 规则 (归一化后子串判定):
/// - 含 KITWE 或 NDOLA → 标准 (恩多拉出发先转运再到主场站提油)
/// - 含 GARNETON → 备用
/// - 其他 → 付费油站
fn classify_loading_point(loading_point: &str) -> DrawPath {
    let lp = loading_point.trim().to_uppercase();
    if lp.contains(PRIMARY_YARD) || lp.contains(SECONDARY_YARD) {
        DrawPath::Standard
    } else if lp.contains("GARNETON") {
        DrawPath::Alternate
    } else {
        DrawPath::PaidStation
    }
}

// ==========================================
// AllocationCalculator - 调拨计算引擎
// ==========================================
pub struct AllocationCalculator {
    // 无状态引擎
}

impl AllocationCalculator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 去程计划
    // ==========================================

    /// 生成去程调拨计划
    ///
    /// 规则序列 (顺序执行, 每步独立):
    /// 1) 出发场站为次级场站 (恩多拉) → 固定转运量
    /// 2) 主提油: 标准 / 备用 / 付费 三选一, 由装货点决定
    /// 3) 中途固定补给; 付费路径下改按 (总油量-基线)-调整常数
    /// 4) 末段补给 = (总油量+补贴) - 累计消耗常数,
    ///    特例目的地无条件改用固定常数
    ///
    /// # 参数
    /// - `start`: 出发场站 (生命周期引擎由装货点推导)
    /// - `destination`: 去程目的地 (特例判定用)
    /// - `loading_point`: 装货点原始输入
    /// - `total_liters`: 路线配置总油量
    /// - `extra`: 批次补贴油量
    pub fn calculate_going(
        &self,
        start: &str,
        destination: &str,
        loading_point: &str,
        total_liters: f64,
        extra: f64,
    ) -> AllocationPlan {
        let mut plan = AllocationPlan::new();

        // 1) 次级场站转运
        if start.trim().to_uppercase() == SECONDARY_YARD {
            plan.push(CheckpointId::NdolaTransfer, SECONDARY_TRANSFER_LTS);
        }

        // 2) 主提油路径 (三选一)
        let draw_path = classify_loading_point(loading_point);
        match draw_path {
            DrawPath::Standard => {
                plan.push(CheckpointId::KitweYard, STANDARD_YARD_DRAW_LTS);
            }
            DrawPath::Alternate => {
                plan.push(CheckpointId::GarnetonYard, ALTERNATE_YARD_DRAW_LTS);
            }
            DrawPath::PaidStation => {
                plan.push(
                    CheckpointId::AcaciaStation,
                    total_liters - PAID_STATION_BASELINE_LTS,
                );
            }
        }

        // 3) 中途补给
        let mid = if draw_path == DrawPath::PaidStation {
            (total_liters - PAID_STATION_BASELINE_LTS) - MID_ROUTE_PAID_ADJUST_LTS
        } else {
            MID_ROUTE_GOING_LTS
        };
        plan.push(CheckpointId::ChingolaMid, mid);

        // 4) 末段补给 (特例目的地无条件覆盖公式)
        let dest = destination.trim().to_uppercase();
        let final_leg = SPECIAL_FINAL_LEG
            .iter()
            .find(|(name, _)| *name == dest)
            .map(|(_, liters)| *liters)
            .unwrap_or_else(|| (total_liters + extra) - FINAL_LEG_CONSUMPTION_LTS);
        plan.push(CheckpointId::CongoFinal, final_leg);

        debug!(
            start = %start,
            destination = %dest,
            draw_path = ?draw_path,
            total_liters,
            extra,
            plan_total = plan.total_abs(),
            "去程调拨计划生成"
        );

        plan
    }

    // ==========================================
    // 回程计划
    // ==========================================

    /// 生成回程调拨计划
    ///
    /// 回程全部为固定常数, 与总油量无关:
    /// - 过境补给
    /// - 入境双站拆分 (恒为两个检查点, 永不合并)
    /// - 中途补给
    /// - 仅当去程原始目的地属于沿海集群: 两段沿海线补给
    ///
    /// # 参数
    /// - `config`: 路线配置快照 (沿海集群成员资格)
    /// - `original_destination`: 去程原始目的地 (original_going_to 快照)
    pub fn calculate_return(
        &self,
        config: &RouteConfig,
        original_destination: &str,
    ) -> AllocationPlan {
        let mut plan = AllocationPlan::new();

        plan.push(CheckpointId::KasumbalesaBorder, BORDER_CROSSING_LTS);
        plan.push(CheckpointId::Whitehouse, RETURN_ENTRY_WHITEHOUSE_LTS);
        plan.push(CheckpointId::Golden, RETURN_ENTRY_GOLDEN_LTS);
        plan.push(CheckpointId::FisengeMid, MID_ROUTE_RETURN_LTS);

        if config.is_coastal(original_destination) {
            plan.push(CheckpointId::MpikaCoastal, COASTAL_MPIKA_LTS);
            plan.push(CheckpointId::KapiriCoastal, COASTAL_KAPIRI_LTS);
        }

        debug!(
            original_destination = %original_destination,
            coastal = config.is_coastal(original_destination),
            plan_total = plan.total_abs(),
            "回程调拨计划生成"
        );

        plan
    }

    // ==========================================
    // 结余计算
    // ==========================================

    /// 计算运行结余
    ///
    /// 结余 = (总油量 + 补贴) - Σ|计划量|
    ///
    /// 绝对值累加是台账迁移约定: 旧台账以负数记录消耗,
    /// 为保持可审计必须保留; 因此结余在任何检查点履约前
    /// 即可为负, 属预期状态而非错误
    pub fn calculate_balance(&self, total_liters: f64, extra: f64, plan: &AllocationPlan) -> f64 {
        (total_liters + extra) - plan.total_abs()
    }
}

impl Default for AllocationCalculator {
    fn default() -> Self {
        Self::new()
    }
}
