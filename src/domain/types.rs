// ==========================================
// 车队燃油调拨系统 - 领域类型定义
// ==========================================
// 红线: 状态是封闭枚举,不是自由字符串
// 序列化格式: SCREAMING_SNAKE_CASE (与台账导出一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 提货单类型 (Delivery Order Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DoType {
    Do,  // 标准提货单
    Sdo, // 辅助提货单
}

impl fmt::Display for DoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoType::Do => write!(f, "DO"),
            DoType::Sdo => write!(f, "SDO"),
        }
    }
}

// ==========================================
// 贸易方向 (Trade Direction)
// ==========================================
// IMPORT = 去程 (进口货物, 出发端 → 目的地)
// EXPORT = 回程 (出口货物, 目的地 → 出发端)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeDirection {
    Import, // 去程
    Export, // 回程
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeDirection::Import => write!(f, "IMPORT"),
            TradeDirection::Export => write!(f, "EXPORT"),
        }
    }
}

// ==========================================
// 匹配类型 (Match Type)
// ==========================================
// 路线/装货点解析的三级匹配: 精确 → 子串 → 模糊
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    Exact,     // 精确匹配
    Substring, // 子串包含
    Fuzzy,     // 模糊相似度
    Unmatched, // 未命中 (返回默认值)
}

impl MatchType {
    /// 转换为字符串标识
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "EXACT",
            MatchType::Substring => "SUBSTRING",
            MatchType::Fuzzy => "FUZZY",
            MatchType::Unmatched => "UNMATCHED",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 配置缺失原因 (Pending Config Reason)
// ==========================================
// 台账锁定时必须输出可追踪的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingConfigReason {
    MissingTotalLiters, // 路线总油量未配置
    MissingExtraFuel,   // 车辆批次补贴未配置
    Both,               // 两者均缺失
}

impl PendingConfigReason {
    /// 转换为字符串标识
    pub fn as_str(&self) -> &'static str {
        match self {
            PendingConfigReason::MissingTotalLiters => "missing_total_liters",
            PendingConfigReason::MissingExtraFuel => "missing_extra_fuel",
            PendingConfigReason::Both => "both",
        }
    }

    /// 根据两个操作数的缺失情况组合原因
    ///
    /// # 返回
    /// - None: 两者均已配置, 无需锁定
    pub fn from_missing(total_missing: bool, extra_missing: bool) -> Option<Self> {
        match (total_missing, extra_missing) {
            (true, true) => Some(PendingConfigReason::Both),
            (true, false) => Some(PendingConfigReason::MissingTotalLiters),
            (false, true) => Some(PendingConfigReason::MissingExtraFuel),
            (false, false) => None,
        }
    }
}

impl fmt::Display for PendingConfigReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 台账状态 (Record State)
// ==========================================
// COMPLETE 是对 ACTIVE_RETURNING 的判定谓词 (见 FuelRecordLifecycle::is_complete),
// 此处仍保留枚举值用于展示与导出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordState {
    LockedPendingConfig, // 配置缺失锁定
    ActiveGoing,         // 去程进行中
    ActiveReturning,     // 回程进行中
    Complete,            // 已闭环
    Cancelled,           // 已取消 (外部信号, 冻结)
}

impl fmt::Display for RecordState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordState::LockedPendingConfig => write!(f, "LOCKED_PENDING_CONFIG"),
            RecordState::ActiveGoing => write!(f, "ACTIVE_GOING"),
            RecordState::ActiveReturning => write!(f, "ACTIVE_RETURNING"),
            RecordState::Complete => write!(f, "COMPLETE"),
            RecordState::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

// ==========================================
// 检查点 (Checkpoint)
// ==========================================
// 铜带 ↔ 刚果/港口走廊上的 12 个固定加油点
// 去程 6 个 + 回程 6 个, 字段顺序即行程顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointId {
    // ===== 去程 =====
    NdolaTransfer,    // 恩多拉次级场站 → 基特韦主场站 转运
    KitweYard,        // 基特韦主场站 (标准提油)
    GarnetonYard,     // 加内顿备用场站 (备用提油)
    AcaciaStation,    // Acacia 付费油站 (付费提油, 生成 LPO)
    ChingolaMid,      // 钦戈拉 中途固定补给
    CongoFinal,       // 刚果段 末段补给 (公式或特例常数)
    // ===== 回程 =====
    KasumbalesaBorder, // 卡孙巴莱萨口岸 过境补给
    Whitehouse,        // Whitehouse 油站 (回程入境双站拆分之一)
    Golden,            // Golden 油站 (回程入境双站拆分之二)
    FisengeMid,        // 菲森盖 回程中途补给 (非沿海线终点检查点)
    MpikaCoastal,      // 姆皮卡 沿海线补给 (仅沿海集群)
    KapiriCoastal,     // 卡皮里 沿海线补给 (沿海线终点检查点)
}

impl CheckpointId {
    /// 全部检查点, 按行程顺序
    pub const ALL: [CheckpointId; 12] = [
        CheckpointId::NdolaTransfer,
        CheckpointId::KitweYard,
        CheckpointId::GarnetonYard,
        CheckpointId::AcaciaStation,
        CheckpointId::ChingolaMid,
        CheckpointId::CongoFinal,
        CheckpointId::KasumbalesaBorder,
        CheckpointId::Whitehouse,
        CheckpointId::Golden,
        CheckpointId::FisengeMid,
        CheckpointId::MpikaCoastal,
        CheckpointId::KapiriCoastal,
    ];

    /// 转换为字符串标识 (台账字段名)
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckpointId::NdolaTransfer => "ndola_transfer",
            CheckpointId::KitweYard => "kitwe_yard",
            CheckpointId::GarnetonYard => "garneton_yard",
            CheckpointId::AcaciaStation => "acacia_station",
            CheckpointId::ChingolaMid => "chingola_mid",
            CheckpointId::CongoFinal => "congo_final",
            CheckpointId::KasumbalesaBorder => "kasumbalesa_border",
            CheckpointId::Whitehouse => "whitehouse",
            CheckpointId::Golden => "golden",
            CheckpointId::FisengeMid => "fisenge_mid",
            CheckpointId::MpikaCoastal => "mpika_coastal",
            CheckpointId::KapiriCoastal => "kapiri_coastal",
        }
    }

    /// 加油站展示名 (LPO 建议用)
    pub fn station_name(&self) -> &'static str {
        match self {
            CheckpointId::NdolaTransfer => "NDOLA YARD",
            CheckpointId::KitweYard => "KITWE YARD",
            CheckpointId::GarnetonYard => "GARNETON YARD",
            CheckpointId::AcaciaStation => "ACACIA STATION",
            CheckpointId::ChingolaMid => "CHINGOLA STATION",
            CheckpointId::CongoFinal => "CONGO STATION",
            CheckpointId::KasumbalesaBorder => "KASUMBALESA BORDER",
            CheckpointId::Whitehouse => "WHITEHOUSE STATION",
            CheckpointId::Golden => "GOLDEN STATION",
            CheckpointId::FisengeMid => "FISENGE STATION",
            CheckpointId::MpikaCoastal => "MPIKA STATION",
            CheckpointId::KapiriCoastal => "KAPIRI STATION",
        }
    }

    /// 是否公司场站 (免费油, 不生成 LPO)
    ///
    /// 规则:
    /// - 去程的场站转运/标准/备用提油来自公司库存 → true
    /// - 付费油站与回程全部补给点均为外购 → false
    pub fn is_company_yard(&self) -> bool {
        matches!(
            self,
            CheckpointId::NdolaTransfer | CheckpointId::KitweYard | CheckpointId::GarnetonYard
        )
    }
}

impl fmt::Display for CheckpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_reason_combination() {
        assert_eq!(
            PendingConfigReason::from_missing(true, true),
            Some(PendingConfigReason::Both)
        );
        assert_eq!(
            PendingConfigReason::from_missing(true, false),
            Some(PendingConfigReason::MissingTotalLiters)
        );
        assert_eq!(
            PendingConfigReason::from_missing(false, true),
            Some(PendingConfigReason::MissingExtraFuel)
        );
        assert_eq!(PendingConfigReason::from_missing(false, false), None);
    }

    #[test]
    fn test_checkpoint_company_yard_split() {
        // 公司场站只有去程前三个, 其余全部为付费点
        let yards: Vec<_> = CheckpointId::ALL
            .iter()
            .filter(|c| c.is_company_yard())
            .collect();
        assert_eq!(yards.len(), 3);
        assert!(!CheckpointId::AcaciaStation.is_company_yard());
        assert!(!CheckpointId::Whitehouse.is_company_yard());
    }

    #[test]
    fn test_display_format() {
        assert_eq!(RecordState::ActiveGoing.to_string(), "ACTIVE_GOING");
        assert_eq!(MatchType::Fuzzy.to_string(), "FUZZY");
        assert_eq!(CheckpointId::CongoFinal.to_string(), "congo_final");
    }
}
