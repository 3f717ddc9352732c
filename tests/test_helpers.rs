// ==========================================
// 测试辅助函数
// ==========================================
// 标准测试配置: 铜带 ↔ 刚果走廊的路线/批次快照
// 各测试文件通过 `mod test_helpers;` 复用
// ==========================================

#![allow(dead_code)]

use chrono::NaiveDate;
use fleet_fuel_engine::config::{BatchTier, RouteConfig, TruckBatchConfig};
use fleet_fuel_engine::domain::types::{DoType, TradeDirection};
use fleet_fuel_engine::domain::DeliveryOrder;

/// 标准路线配置
///
/// KOLWEZI 2400L / KAMOA 2500L / LUSAKA 800L 等;
/// 装货点 KAMOA 附加 150L; 沿海集群 DAR ES SALAAM / MOMBASA
pub fn standard_route_config() -> RouteConfig {
    RouteConfig::new()
        .with_route("KOLWEZI", 2400.0)
        .with_route("LUBUMBASHI", 2000.0)
        .with_route("LIKASI", 2200.0)
        .with_route("FUNGURUME", 2300.0)
        .with_route("KAMOA", 2500.0)
        .with_route("LUSAKA", 800.0)
        .with_route("SOLWEZI", 1200.0)
        .with_route("DAR ES SALAAM", 3400.0)
        .with_loading_point_extra("KAMOA", 150.0)
        .with_loading_point_extra("KIPUSHI", 100.0)
        .with_coastal("DAR ES SALAAM", 200.0)
        .with_coastal("MOMBASA", 250.0)
}

/// 标准车队批次配置 (100/80/60 三档)
pub fn standard_batch_config() -> TruckBatchConfig {
    TruckBatchConfig::new()
        .with_tier(BatchTier::new("batch_100", 100.0, &["dxy", "kbr", "aqj"]))
        .with_tier(BatchTier::new("batch_80", 80.0, &["mno", "txw"]))
        .with_tier(BatchTier::new("batch_60", 60.0, &["pqr", "lmf"]))
        .with_override("kbr", "KOLWEZI", 130.0)
}

/// 创建去程 (IMPORT) 提货单
pub fn going_order(do_number: &str, truck_no: &str, destination: &str, day: u32) -> DeliveryOrder {
    DeliveryOrder {
        do_number: do_number.to_string(),
        do_type: DoType::Do,
        direction: TradeDirection::Import,
        truck_no: truck_no.to_string(),
        destination: destination.to_string(),
        loading_point: "KITWE YARD".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 3, day).expect("测试日期非法"),
    }
}

/// 创建回程 (EXPORT) 提货单
pub fn return_order(do_number: &str, truck_no: &str, destination: &str, day: u32) -> DeliveryOrder {
    DeliveryOrder {
        do_number: do_number.to_string(),
        do_type: DoType::Do,
        direction: TradeDirection::Export,
        truck_no: truck_no.to_string(),
        destination: destination.to_string(),
        loading_point: destination.to_string(),
        date: NaiveDate::from_ymd_opt(2026, 3, day).expect("测试日期非法"),
    }
}
