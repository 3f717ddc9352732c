// ==========================================
// 车队燃油调拨系统 - 路线配置快照
// ==========================================
// 职责: 目的地/装货点/沿海集群 → 油量 的只读映射
// 红线: 配置以显式快照逐调用传入, 不存在环境全局态
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 目的地未命中时的默认总油量 (升)
///
/// 产品决策: 未配置路线按 2000L 预估供人工复核;
/// 解析结果同时带 matched=false, 由调用方落为锁定台账
pub const DEFAULT_TOTAL_LITERS: f64 = 2000.0;

// ==========================================
// RouteConfig - 路线配置
// ==========================================
/// 路线配置快照 (每次计算传入, 只读)
///
/// 三张表共用三级匹配策略 (精确 → 子串 → 模糊):
/// - `routes`: 目的地 → 往返总油量
/// - `loading_point_extra`: 装货点 → 附加油量
/// - `coastal_cluster`: 沿海集群目的地 → 附加油量
///   (集群成员资格同时决定回程沿海段补给与终点检查点)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    /// 目的地 → 总油量 (升)
    pub routes: BTreeMap<String, f64>,

    /// 装货点 → 附加油量 (升)
    #[serde(default)]
    pub loading_point_extra: BTreeMap<String, f64>,

    /// 沿海集群目的地 → 附加油量 (升)
    #[serde(default)]
    pub coastal_cluster: BTreeMap<String, f64>,

    /// 未命中目的地的默认总油量
    #[serde(default = "default_total_liters")]
    pub default_total_liters: f64,
}

fn default_total_liters() -> f64 {
    DEFAULT_TOTAL_LITERS
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            routes: BTreeMap::new(),
            loading_point_extra: BTreeMap::new(),
            coastal_cluster: BTreeMap::new(),
            default_total_liters: DEFAULT_TOTAL_LITERS,
        }
    }
}

impl RouteConfig {
    /// 创建空配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 录入一条路线 (键统一归一化为大写去空白)
    pub fn with_route(mut self, destination: &str, liters: f64) -> Self {
        self.routes
            .insert(destination.trim().to_uppercase(), liters);
        self
    }

    /// 录入一条装货点附加油量
    pub fn with_loading_point_extra(mut self, loading_point: &str, liters: f64) -> Self {
        self.loading_point_extra
            .insert(loading_point.trim().to_uppercase(), liters);
        self
    }

    /// 录入一个沿海集群目的地
    pub fn with_coastal(mut self, destination: &str, liters: f64) -> Self {
        self.coastal_cluster
            .insert(destination.trim().to_uppercase(), liters);
        self
    }

    /// 目的地是否属于沿海集群 (精确键判定)
    pub fn is_coastal(&self, destination: &str) -> bool {
        self.coastal_cluster
            .contains_key(&destination.trim().to_uppercase())
    }
}
