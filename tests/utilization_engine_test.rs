// ==========================================
// UtilizationEngine / CapacityApi 集成测试
// ==========================================
// 测试目标: 阶梯式利用率口径, 空班组边界, API 聚合
// ==========================================

mod helpers;

use std::sync::Arc;

use helpers::{
    make_bay, make_date, make_member, make_schedule, make_status_project, InMemoryDataSource,
};
use mfg_impact_assessment::api::CapacityApi;
use mfg_impact_assessment::domain::capacity::CapacityRecord;
use mfg_impact_assessment::engine::{stepped_utilization, UtilizationEngine};

// ==========================================
// 测试用例 1: 阶梯口径 0/1/2/3/4 → 0/75/100/120/120
// ==========================================

#[test]
fn test_stepped_utilization_sequence() {
    let expected = [0.0, 75.0, 100.0, 120.0, 120.0];
    for (count, want) in expected.iter().enumerate() {
        assert_eq!(stepped_utilization(count), *want, "count={}", count);
    }
}

#[test]
fn test_stepping_independent_of_capacity_hours() {
    let engine = UtilizationEngine::new();
    let as_of = make_date(2024, 6, 1);

    // 两个班组: 产能工时差一个数量级, 在制项目数相同 → 利用率相同
    let schedules = vec![make_schedule("S-1", "BAY-1", "P-1", None)];
    let projects = vec![make_status_project("P-1", "In Production")];

    let small_roster = vec![make_member("TM-1", Some("BAY-1"), true)];
    let big_roster: Vec<_> = (0..10)
        .map(|i| make_member(&format!("TM-{}", i), Some("BAY-1"), true))
        .collect();

    let bays = vec!["BAY-1".to_string()];
    let small = engine.estimate_utilization(&bays, &small_roster, &schedules, &projects, as_of);
    let big = engine.estimate_utilization(&bays, &big_roster, &schedules, &projects, as_of);

    assert_eq!(small.utilization_percent, 75.0);
    assert_eq!(big.utilization_percent, 75.0);
    assert_ne!(small.total_capacity_hours, big.total_capacity_hours);
}

// ==========================================
// 测试用例 2: 空工位集 → 全零记录
// ==========================================

#[tokio::test]
async fn test_empty_team_bays_all_zero_via_api() {
    let data_source = Arc::new(InMemoryDataSource {
        members: vec![make_member("TM-1", Some("BAY-1"), true)],
        schedules: vec![make_schedule("S-1", "BAY-1", "P-1", None)],
        projects: vec![make_status_project("P-1", "In Production")],
        ..Default::default()
    });
    let api = CapacityApi::new(data_source);

    let record = api.team_capacity(&[], make_date(2024, 6, 1)).await.unwrap();

    assert_eq!(record, CapacityRecord::empty());
}

// ==========================================
// 测试用例 3: 已交付/已取消项目不计入在制
// ==========================================

#[tokio::test]
async fn test_delivered_and_cancelled_excluded() {
    let data_source = Arc::new(InMemoryDataSource {
        schedules: vec![
            make_schedule("S-1", "BAY-1", "P-1", None),
            make_schedule("S-2", "BAY-1", "P-2", None),
            make_schedule("S-3", "BAY-1", "P-3", None),
            make_schedule("S-4", "BAY-1", "P-4", None),
        ],
        projects: vec![
            make_status_project("P-1", "Delivered"),
            make_status_project("P-2", "Cancelled"),
            make_status_project("P-3", "In Production"),
            make_status_project("P-4", "Planning"),
        ],
        ..Default::default()
    });
    let api = CapacityApi::new(data_source);

    let record = api
        .team_capacity(&["BAY-1".to_string()], make_date(2024, 6, 1))
        .await
        .unwrap();

    assert_eq!(record.active_project_count, 2);
    assert_eq!(record.utilization_percent, 100.0);
}

// ==========================================
// 测试用例 4: 按班组聚合 (工位 → 班组)
// ==========================================

#[tokio::test]
async fn test_all_team_capacities_grouping() {
    let data_source = Arc::new(InMemoryDataSource {
        bays: vec![
            make_bay("BAY-1", Some("Alpha")),
            make_bay("BAY-2", Some("Alpha")),
            make_bay("BAY-3", Some("Bravo")),
            make_bay("BAY-9", None), // 未指派班组, 不计
        ],
        members: vec![
            make_member("TM-1", Some("BAY-1"), true),
            make_member("TM-2", Some("BAY-2"), true),
            make_member("TM-3", Some("BAY-3"), true),
        ],
        schedules: vec![
            make_schedule("S-1", "BAY-1", "P-1", None),
            make_schedule("S-2", "BAY-2", "P-2", None),
            make_schedule("S-3", "BAY-3", "P-3", None),
        ],
        projects: vec![
            make_status_project("P-1", "In Production"),
            make_status_project("P-2", "In Production"),
            make_status_project("P-3", "In Production"),
        ],
    });
    let api = CapacityApi::new(data_source);

    let teams = api.all_team_capacities(make_date(2024, 6, 1)).await.unwrap();

    assert_eq!(teams.len(), 2);
    // BTreeMap 聚合: 字母序稳定
    assert_eq!(teams[0].team, "Alpha");
    assert_eq!(teams[0].record.member_count, 2);
    assert_eq!(teams[0].record.active_project_count, 2);
    assert_eq!(teams[0].record.utilization_percent, 100.0);

    assert_eq!(teams[1].team, "Bravo");
    assert_eq!(teams[1].record.member_count, 1);
    assert_eq!(teams[1].record.active_project_count, 1);
    assert_eq!(teams[1].record.utilization_percent, 75.0);
}

// ==========================================
// 测试用例 5: 工时缺省与效率折算
// ==========================================

#[tokio::test]
async fn test_capacity_hours_defaults_and_efficiency() {
    let mut part_timer = make_member("TM-2", Some("BAY-1"), true);
    part_timer.hours_per_week = Some(20.0);
    part_timer.efficiency_rate = Some(80.0);

    let data_source = Arc::new(InMemoryDataSource {
        members: vec![make_member("TM-1", Some("BAY-1"), true), part_timer],
        ..Default::default()
    });
    let api = CapacityApi::new(data_source);

    let record = api
        .team_capacity(&["BAY-1".to_string()], make_date(2024, 6, 1))
        .await
        .unwrap();

    assert_eq!(record.member_count, 2);
    assert_eq!(record.total_capacity_hours, 56.0); // 40×1.0 + 20×0.8
}
