// ==========================================
// 全流程端到端测试
// ==========================================
// 场景: 去程单 → 解析 → 台账创建 → 回程单挂接 →
//       LPO 建议 → 外部履约回写 → 闭环
// 角色分工: 本内核只计算与建议, 持久化/开单/履约由外部完成
// ==========================================

mod test_helpers;

use fleet_fuel_engine::domain::types::{CheckpointId, RecordState};
use fleet_fuel_engine::domain::FuelRecord;
use fleet_fuel_engine::engine::{
    FuelRecordLifecycle, LpoAdvisoryEngine, RouteConfigResolver, TruckBatchResolver,
};

/// 场景: KOLWEZI 往返全流程
#[test]
fn test_full_round_trip_kolwezi() {
    fleet_fuel_engine::logging::init_test();
    let route_resolver = RouteConfigResolver::new();
    let batch_resolver = TruckBatchResolver::new();
    let lifecycle = FuelRecordLifecycle::new();
    let lpo = LpoAdvisoryEngine::new();
    let route_cfg = test_helpers::standard_route_config();
    let batch_cfg = test_helpers::standard_batch_config();

    // ===== 1. 去程单到达, 解析配置 =====
    let going = test_helpers::going_order("DO-9001", "T123 DXY", "KOLWEZI", 1);

    let route_match = route_resolver.resolve_total_liters(&route_cfg, &going.destination);
    assert!(route_match.matched);
    let extra_match =
        batch_resolver.resolve_extra_fuel(&batch_cfg, &going.truck_no, Some(&going.destination));
    assert!(extra_match.matched);
    assert_eq!(extra_match.extra_fuel, 100.0);

    // ===== 2. 台账创建 (解析命中 → 活动态) =====
    let record = lifecycle.create_from_going_order(
        &going,
        &going.loading_point,
        Some(route_match.liters),
        Some(extra_match.extra_fuel),
    );
    assert_eq!(record.state(), RecordState::ActiveGoing);
    assert_eq!(record.balance(), -100.0);

    // 场站装货 → 去程无 LPO 建议
    let going_plan = match &record {
        FuelRecord::ActiveGoing(r) => r.going_plan.clone(),
        other => panic!("期望去程态, 实际 {:?}", other.state()),
    };
    assert!(lpo.determine_lpos(&record, &going_plan, false).is_empty());

    // ===== 3. 回程单到达, 挂接开放台账 =====
    let ret = test_helpers::return_order("DO-9002", "T123 DXY", "KAMOA", 6);
    let records = vec![record];
    let open = lifecycle
        .find_open_going_record(&ret.truck_no, &records)
        .expect("应找到开放台账");
    assert_eq!(open.going_do(), "DO-9001");

    let record = records.into_iter().next().expect("台账列表非空");
    let record = lifecycle
        .apply_return_order(record, &ret, &route_cfg)
        .expect("回程单应用失败");
    assert_eq!(record.state(), RecordState::ActiveReturning);
    assert_eq!(record.total_lts(), Some(2650.0));
    assert_eq!(record.balance(), 150.0);

    // ===== 4. 回程 LPO 建议交外部采购 =====
    let return_plan = match &record {
        FuelRecord::ActiveReturning(r) => r.return_plan.clone(),
        other => panic!("期望回程态, 实际 {:?}", other.state()),
    };
    let advisories = lpo.determine_lpos(&record, &return_plan, true);
    assert_eq!(advisories.len(), 4); // KOLWEZI 非沿海

    // ===== 5. 外部履约逐笔回写 =====
    let mut record = record;
    lifecycle
        .record_checkpoint_fill(&mut record, CheckpointId::KasumbalesaBorder, 100.0)
        .expect("履约登记失败");
    lifecycle
        .record_checkpoint_fill(&mut record, CheckpointId::Whitehouse, -250.0)
        .expect("履约登记失败"); // 多发纠正: 负数冲账
    lifecycle
        .record_checkpoint_fill(&mut record, CheckpointId::Golden, 50.0)
        .expect("履约登记失败");
    assert_eq!(record.balance(), 250.0);
    assert!(!lifecycle.is_complete(&route_cfg, &record));

    lifecycle
        .record_checkpoint_fill(&mut record, CheckpointId::FisengeMid, 250.0)
        .expect("履约登记失败");

    // ===== 6. 闭环: 结余归零 ∧ 终点检查点已加注 =====
    assert_eq!(record.balance(), 0.0);
    assert!(lifecycle.is_complete(&route_cfg, &record));
    assert_eq!(
        lifecycle.display_state(&route_cfg, &record),
        RecordState::Complete
    );
}

/// 场景: 配置缺失 → 锁定 → 无主回程
#[test]
fn test_unconfigured_route_locks_and_return_unlinked() {
    fleet_fuel_engine::logging::init_test();
    let route_resolver = RouteConfigResolver::new();
    let batch_resolver = TruckBatchResolver::new();
    let lifecycle = FuelRecordLifecycle::new();
    let route_cfg = test_helpers::standard_route_config();
    let batch_cfg = test_helpers::standard_batch_config();

    // 未配置目的地 + 未配置后缀 → 双缺失
    let going = test_helpers::going_order("DO-9003", "T555 QQQ", "NOWHERESVILLE", 2);
    let route_match = route_resolver.resolve_total_liters(&route_cfg, &going.destination);
    let extra_match = batch_resolver.resolve_extra_fuel(&batch_cfg, &going.truck_no, None);
    assert!(!route_match.matched);
    assert!(!extra_match.matched);

    // 调用方约定: 未命中传 None
    let record = lifecycle.create_from_going_order(&going, &going.loading_point, None, None);
    assert_eq!(record.state(), RecordState::LockedPendingConfig);
    assert_eq!(record.balance(), 0.0);

    // 另一辆车的回程单找不到开放台账 → 无主回程 (None, 非错误)
    let records = vec![record];
    assert!(lifecycle
        .find_open_going_record("T000 NONE", &records)
        .is_none());
}
