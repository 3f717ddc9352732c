// ==========================================
// 车队燃油调拨系统 - 车队批次配置快照
// ==========================================
// 职责: 车牌后缀分批 → 固定补贴油量
// 规则: 批次按补贴从高到低排序, 首个命中生效;
//       (后缀, 目的地) 覆写条目优先于批次成员资格
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 后缀未命中任何批次时的默认补贴 (升)
///
/// 产品决策: 默认 0L 且 matched=false,
/// 由调用方落为 missing_extra_fuel 锁定台账
pub const DEFAULT_EXTRA_FUEL: f64 = 0.0;

// ==========================================
// BatchTier - 批次档位
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchTier {
    /// 批次名 (如 "batch_100")
    pub name: String,

    /// 该批次的固定补贴油量 (升)
    pub extra_fuel: f64,

    /// 批次成员: 小写车牌后缀集合
    pub suffixes: BTreeSet<String>,
}

impl BatchTier {
    /// 创建批次档位
    pub fn new(name: &str, extra_fuel: f64, suffixes: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            extra_fuel,
            suffixes: suffixes.iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    /// 后缀是否属于本批次
    pub fn contains(&self, suffix: &str) -> bool {
        self.suffixes.contains(suffix)
    }
}

// ==========================================
// BatchOverride - 定向覆写条目
// ==========================================
/// (后缀, 目的地) 定向补贴覆写, 优先于批次成员资格
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOverride {
    /// 小写车牌后缀
    pub suffix: String,
    /// 大写目的地
    pub destination: String,
    /// 覆写补贴油量 (升)
    pub extra_fuel: f64,
}

// ==========================================
// TruckBatchConfig - 车队批次配置
// ==========================================
/// 车队批次配置快照 (每次计算传入, 只读)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruckBatchConfig {
    /// 批次档位, 按补贴从高到低排列 (解析按此顺序扫描)
    pub tiers: Vec<BatchTier>,

    /// 定向覆写条目
    #[serde(default)]
    pub overrides: Vec<BatchOverride>,

    /// 未命中批次时的默认补贴
    #[serde(default = "default_extra_fuel")]
    pub default_extra_fuel: f64,
}

fn default_extra_fuel() -> f64 {
    DEFAULT_EXTRA_FUEL
}

impl Default for TruckBatchConfig {
    fn default() -> Self {
        Self {
            tiers: Vec::new(),
            overrides: Vec::new(),
            default_extra_fuel: DEFAULT_EXTRA_FUEL,
        }
    }
}

impl TruckBatchConfig {
    /// 创建空配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个批次档位
    ///
    /// 调用方负责保持补贴从高到低的录入顺序;
    /// 解析按录入顺序扫描, 首个命中生效
    pub fn with_tier(mut self, tier: BatchTier) -> Self {
        self.tiers.push(tier);
        self
    }

    /// 录入一条 (后缀, 目的地) 覆写补贴
    pub fn with_override(mut self, suffix: &str, destination: &str, extra_fuel: f64) -> Self {
        self.overrides.push(BatchOverride {
            suffix: suffix.to_lowercase(),
            destination: destination.trim().to_uppercase(),
            extra_fuel,
        });
        self
    }

    /// 查询覆写条目 (首个命中生效)
    pub fn override_for(&self, suffix: &str, destination: &str) -> Option<f64> {
        let suffix = suffix.to_lowercase();
        let destination = destination.trim().to_uppercase();
        self.overrides
            .iter()
            .find(|o| o.suffix == suffix && o.destination == destination)
            .map(|o| o.extra_fuel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_suffix_lowercased() {
        let tier = BatchTier::new("batch_100", 100.0, &["DXY", "abc"]);
        assert!(tier.contains("dxy"));
        assert!(tier.contains("abc"));
        assert!(!tier.contains("DXY")); // 查询方负责小写归一化
    }

    #[test]
    fn test_override_lookup_normalized() {
        let cfg = TruckBatchConfig::new().with_override("DXY", " kolwezi ", 130.0);
        assert_eq!(cfg.override_for("dxy", "KOLWEZI"), Some(130.0));
        assert_eq!(cfg.override_for("dxy", "LUSAKA"), None);
    }
}
