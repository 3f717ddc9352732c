// ==========================================
// 车队燃油调拨系统 - 路线配置解析引擎
// ==========================================
// 职责: 目的地/装货点字符串 → 配置油量
// 规则: 三级匹配, 顺序执行, 命中即返回
//   1) 精确键匹配
//   2) 双向子串包含 (按键字典序扫描, 首个命中)
//   3) 模糊相似度 ≥ FUZZY_MATCH_THRESHOLD, 取最高分
// 红线: 未命中不抛错, 返回 matched=false + 默认值 + 人工复核建议
// ==========================================

use crate::config::RouteConfig;
use crate::domain::types::MatchType;
use crate::engine::similarity::{
    similarity, FUZZY_MATCH_THRESHOLD, MAX_SUGGESTIONS, SUGGESTION_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

// ==========================================
// 解析结果
// ==========================================

/// 人工复核建议条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSuggestion {
    /// 候选路线名
    pub route: String,
    /// 相似度得分 [0, 1]
    pub score: f64,
}

/// 目的地总油量解析结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteMatch {
    /// 解析出的总油量 (未命中时为配置默认值)
    pub liters: f64,
    /// 是否命中配置
    pub matched: bool,
    /// 匹配方式
    pub match_type: MatchType,
    /// 命中的路线键 (未命中为 None)
    pub matched_route: Option<String>,
    /// 未命中时的近似路线建议 (仅供人工复核, 内核不据此行动)
    pub suggestions: Vec<RouteSuggestion>,
}

/// 小表 (装货点/沿海集群) 的内部匹配结果
struct TableHit {
    value: f64,
    key: String,
    match_type: MatchType,
}

// ==========================================
// RouteConfigResolver - 路线配置解析引擎
// ==========================================
pub struct RouteConfigResolver {
    // 无状态引擎, 配置快照逐调用传入
}

impl RouteConfigResolver {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 解析目的地的配置总油量
    ///
    /// # 参数
    /// - `config`: 路线配置快照
    /// - `destination`: 目的地原始输入 (允许脏数据)
    ///
    /// # 返回
    /// 未命中时 liters = config.default_total_liters, matched = false,
    /// suggestions 为得分 ≥ 0.40 的前 3 条候选
    pub fn resolve_total_liters(&self, config: &RouteConfig, destination: &str) -> RouteMatch {
        let input = normalize(destination);

        if input.is_empty() {
            return RouteMatch {
                liters: config.default_total_liters,
                matched: false,
                match_type: MatchType::Unmatched,
                matched_route: None,
                suggestions: Vec::new(),
            };
        }

        if let Some(hit) = self.match_in_table(&config.routes, &input) {
            debug!(
                destination = %input,
                route = %hit.key,
                match_type = %hit.match_type,
                liters = hit.value,
                "路线解析命中"
            );
            return RouteMatch {
                liters: hit.value,
                matched: true,
                match_type: hit.match_type,
                matched_route: Some(hit.key),
                suggestions: Vec::new(),
            };
        }

        let suggestions = self.collect_suggestions(&config.routes, &input);
        debug!(
            destination = %input,
            default_liters = config.default_total_liters,
            suggestion_count = suggestions.len(),
            "路线解析未命中, 返回默认值"
        );

        RouteMatch {
            liters: config.default_total_liters,
            matched: false,
            match_type: MatchType::Unmatched,
            matched_route: None,
            suggestions,
        }
    }

    /// 解析装货点附加油量 (未命中返回 0)
    pub fn resolve_loading_point_extra(&self, config: &RouteConfig, loading_point: &str) -> f64 {
        let input = normalize(loading_point);
        if input.is_empty() {
            return 0.0;
        }
        self.match_in_table(&config.loading_point_extra, &input)
            .map(|hit| hit.value)
            .unwrap_or(0.0)
    }

    /// 解析沿海集群附加油量 (未命中返回 0)
    pub fn resolve_destination_cluster_extra(&self, config: &RouteConfig, destination: &str) -> f64 {
        let input = normalize(destination);
        if input.is_empty() {
            return 0.0;
        }
        self.match_in_table(&config.coastal_cluster, &input)
            .map(|hit| hit.value)
            .unwrap_or(0.0)
    }

    // ==========================================
    // 三级匹配 (私有)
    // ==========================================

    /// 对一张 名称 → 油量 表执行三级匹配
    ///
    /// 输入必须已归一化 (大写去空白) 且非空
    fn match_in_table(&self, table: &BTreeMap<String, f64>, input: &str) -> Option<TableHit> {
        // 1) 精确匹配
        if let Some(&value) = table.get(input) {
            return Some(TableHit {
                value,
                key: input.to_string(),
                match_type: MatchType::Exact,
            });
        }

        // 2) 双向子串包含, 按键字典序首个命中
        for (key, &value) in table {
            if key.contains(input) || input.contains(key.as_str()) {
                return Some(TableHit {
                    value,
                    key: key.clone(),
                    match_type: MatchType::Substring,
                });
            }
        }

        // 3) 模糊相似度, 取最高分且 ≥ 阈值
        let best = table
            .iter()
            .map(|(key, &value)| (key, value, similarity(input, key)))
            .max_by(|a, b| a.2.total_cmp(&b.2))?;

        if best.2 >= FUZZY_MATCH_THRESHOLD {
            return Some(TableHit {
                value: best.1,
                key: best.0.clone(),
                match_type: MatchType::Fuzzy,
            });
        }

        None
    }

    /// 未命中时收集人工复核建议 (得分降序, 截断至 MAX_SUGGESTIONS)
    fn collect_suggestions(
        &self,
        table: &BTreeMap<String, f64>,
        input: &str,
    ) -> Vec<RouteSuggestion> {
        let mut scored: Vec<RouteSuggestion> = table
            .keys()
            .map(|key| RouteSuggestion {
                route: key.clone(),
                score: similarity(input, key),
            })
            .filter(|s| s.score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(MAX_SUGGESTIONS);
        scored
    }
}

impl Default for RouteConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// 输入归一化: 去空白 + 大写
fn normalize(input: &str) -> String {
    input.trim().to_uppercase()
}
