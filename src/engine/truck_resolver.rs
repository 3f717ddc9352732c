// ==========================================
// 车队燃油调拨系统 - 车队批次解析引擎
// ==========================================
// 职责: 车牌后缀 → 批次补贴油量
// 规则: 顺序执行, 命中即返回
//   1) (后缀, 目的地) 定向覆写
//   2) 批次档位从高补贴到低补贴扫描成员资格
//   3) 全部未命中 → matched=false + 默认补贴
//      (由调用方落为 missing_extra_fuel 锁定台账)
// ==========================================

use crate::config::TruckBatchConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

// ==========================================
// 解析结果
// ==========================================

/// 批次补贴解析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraFuelMatch {
    /// 补贴油量 (未命中时为配置默认值)
    pub extra_fuel: f64,
    /// 是否命中配置
    pub matched: bool,
    /// 提取出的小写车牌后缀 (空车牌为空串)
    pub truck_suffix: String,
    /// 命中的批次名 ("override" 表示定向覆写命中, 未命中为空串)
    pub batch_name: String,
}

// ==========================================
// TruckBatchResolver - 车队批次解析引擎
// ==========================================
pub struct TruckBatchResolver {
    // 无状态引擎, 配置快照逐调用传入
}

impl TruckBatchResolver {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 解析车辆的批次补贴油量
    ///
    /// # 参数
    /// - `config`: 车队批次配置快照
    /// - `truck_no`: 车牌号, 末段空白分隔词为批次后缀 (允许脏数据)
    /// - `destination_override`: 目的地, 供定向覆写条目匹配 (可选)
    ///
    /// # 边界处理
    /// - 空白车牌 → 后缀为空串, matched=false
    pub fn resolve_extra_fuel(
        &self,
        config: &TruckBatchConfig,
        truck_no: &str,
        destination_override: Option<&str>,
    ) -> ExtraFuelMatch {
        let suffix = extract_suffix(truck_no);

        if suffix.is_empty() {
            debug!(truck_no = %truck_no, "车牌号为空或无法提取后缀, 返回默认补贴");
            return ExtraFuelMatch {
                extra_fuel: config.default_extra_fuel,
                matched: false,
                truck_suffix: suffix,
                batch_name: String::new(),
            };
        }

        // 1) 定向覆写优先
        if let Some(destination) = destination_override {
            if let Some(extra_fuel) = config.override_for(&suffix, destination) {
                debug!(
                    truck_suffix = %suffix,
                    destination = %destination,
                    extra_fuel,
                    "定向覆写命中"
                );
                return ExtraFuelMatch {
                    extra_fuel,
                    matched: true,
                    truck_suffix: suffix,
                    batch_name: "override".to_string(),
                };
            }
        }

        // 2) 批次档位按录入顺序 (高补贴在前) 扫描, 首个命中生效
        for tier in &config.tiers {
            if tier.contains(&suffix) {
                debug!(
                    truck_suffix = %suffix,
                    batch = %tier.name,
                    extra_fuel = tier.extra_fuel,
                    "批次成员命中"
                );
                return ExtraFuelMatch {
                    extra_fuel: tier.extra_fuel,
                    matched: true,
                    truck_suffix: suffix,
                    batch_name: tier.name.clone(),
                };
            }
        }

        // 3) 未命中
        debug!(truck_suffix = %suffix, "后缀未配置任何批次, 返回默认补贴");
        ExtraFuelMatch {
            extra_fuel: config.default_extra_fuel,
            matched: false,
            truck_suffix: suffix,
            batch_name: String::new(),
        }
    }
}

impl Default for TruckBatchResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// 提取车牌后缀: 末段空白分隔词, 小写化
fn extract_suffix(truck_no: &str) -> String {
    truck_no
        .split_whitespace()
        .last()
        .unwrap_or("")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BatchTier;

    fn test_config() -> TruckBatchConfig {
        TruckBatchConfig::new()
            .with_tier(BatchTier::new("batch_100", 100.0, &["dxy", "kbr"]))
            .with_tier(BatchTier::new("batch_80", 80.0, &["mno", "dxy"])) // dxy 重复配置, 高档优先
            .with_tier(BatchTier::new("batch_60", 60.0, &["pqr"]))
            .with_override("kbr", "KOLWEZI", 130.0)
    }

    #[test]
    fn test_top_tier_hit() {
        let resolver = TruckBatchResolver::new();
        let m = resolver.resolve_extra_fuel(&test_config(), "T123 DXY", None);
        assert!(m.matched);
        assert_eq!(m.extra_fuel, 100.0);
        assert_eq!(m.truck_suffix, "dxy");
        assert_eq!(m.batch_name, "batch_100");
    }

    #[test]
    fn test_override_beats_tier() {
        let resolver = TruckBatchResolver::new();
        let m = resolver.resolve_extra_fuel(&test_config(), "T456 KBR", Some("kolwezi"));
        assert!(m.matched);
        assert_eq!(m.extra_fuel, 130.0);
        assert_eq!(m.batch_name, "override");
        // 覆写目的地不匹配时回落批次
        let m = resolver.resolve_extra_fuel(&test_config(), "T456 KBR", Some("LUSAKA"));
        assert_eq!(m.extra_fuel, 100.0);
        assert_eq!(m.batch_name, "batch_100");
    }

    #[test]
    fn test_unknown_suffix_unmatched() {
        let resolver = TruckBatchResolver::new();
        let m = resolver.resolve_extra_fuel(&test_config(), "T789 ZZZ", None);
        assert!(!m.matched);
        assert_eq!(m.extra_fuel, 0.0);
        assert_eq!(m.batch_name, "");
    }

    #[test]
    fn test_empty_truck_no_degrades() {
        let resolver = TruckBatchResolver::new();
        let m = resolver.resolve_extra_fuel(&test_config(), "   ", None);
        assert!(!m.matched);
        assert_eq!(m.truck_suffix, "");
    }

    #[test]
    fn test_lower_tier_hit() {
        let resolver = TruckBatchResolver::new();
        let m = resolver.resolve_extra_fuel(&test_config(), "ZM 40 PQR", None);
        assert_eq!(m.extra_fuel, 60.0);
        assert_eq!(m.batch_name, "batch_60");
    }
}
