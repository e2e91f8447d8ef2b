// ==========================================
// 制造运营影响评估系统 - 产能利用率引擎
// ==========================================
// 职责: 按班组聚合成员产能与在制项目数, 计算阶梯式利用率
// 输入: 班组工位集 + 成员名册 + 工位排程 + 项目状态 (均只读)
// 输出: CapacityRecord (实时派生, 从不持久化)
// ==========================================
// 红线: 阶梯口径为固定业务规则, 0/1/2/≥3 → 0/75/100/120,
//       按原样保留, 不得替换为连续比值
// ==========================================

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::capacity::{
    CapacityRecord, ManufacturingSchedule, TeamMember, DEFAULT_EFFICIENCY_RATE,
    DEFAULT_HOURS_PER_WEEK,
};
use crate::domain::project::Project;

// ==========================================
// 阶梯式利用率口径 (在制项目数 → 利用率%)
// ==========================================
// ≥3 个并行项目即视为超载 (120%)
pub const UTILIZATION_STEPS: [(usize, f64); 4] = [(0, 0.0), (1, 75.0), (2, 100.0), (3, 120.0)];

/// 在制项目数 → 阶梯利用率
pub fn stepped_utilization(active_project_count: usize) -> f64 {
    match active_project_count {
        0 => UTILIZATION_STEPS[0].1,
        1 => UTILIZATION_STEPS[1].1,
        2 => UTILIZATION_STEPS[2].1,
        _ => UTILIZATION_STEPS[3].1,
    }
}

// ==========================================
// UtilizationEngine - 产能利用率引擎
// ==========================================
pub struct UtilizationEngine;

impl UtilizationEngine {
    pub fn new() -> Self {
        Self
    }

    /// 估算单个班组的产能记录
    ///
    /// # 参数
    /// - `team_bay_ids`: 班组负责的工位集
    /// - `members`: 全量成员名册 (按工位与在岗状态过滤)
    /// - `schedules`: 全量工位排程 (按工位与结束日期过滤)
    /// - `projects`: 全量项目 (用于剔除已交付/已取消)
    /// - `as_of`: 截止日期 (显式传入, 引擎不读时钟)
    ///
    /// 无匹配工位或成员时返回全零记录, 从不报错
    pub fn estimate_utilization(
        &self,
        team_bay_ids: &[String],
        members: &[TeamMember],
        schedules: &[ManufacturingSchedule],
        projects: &[Project],
        as_of: NaiveDate,
    ) -> CapacityRecord {
        if team_bay_ids.is_empty() {
            return CapacityRecord::empty();
        }

        let bay_set: HashSet<&str> = team_bay_ids.iter().map(String::as_str).collect();

        // 1. 过滤排程: 工位属于本班组, 且尚未结束 (结束日期缺失视为进行中)
        let open_project_ids: HashSet<&str> = schedules
            .iter()
            .filter(|s| bay_set.contains(s.bay_id.as_str()))
            .filter(|s| s.end_date.map(|end| end >= as_of).unwrap_or(true))
            .map(|s| s.project_id.as_str())
            .collect();

        // 2. 剔除已关闭项目, 得到在制项目数
        let active_project_count = open_project_ids
            .iter()
            .filter(|project_id| {
                projects
                    .iter()
                    .find(|p| p.id == **project_id)
                    .map(|p| p.is_open())
                    // 排程引用了未知项目: 按在制计 (数据服务分页等场景下宁可高估负载)
                    .unwrap_or(true)
            })
            .count();

        // 3. 成员过滤与产能工时汇总
        let active_members: Vec<&TeamMember> = members
            .iter()
            .filter(|m| m.is_active)
            .filter(|m| {
                m.bay_id
                    .as_deref()
                    .map(|bay| bay_set.contains(bay))
                    .unwrap_or(false)
            })
            .collect();

        let total_capacity_hours: f64 = active_members
            .iter()
            .map(|m| {
                let hours = m.hours_per_week.unwrap_or(DEFAULT_HOURS_PER_WEEK);
                let efficiency = m.efficiency_rate.unwrap_or(DEFAULT_EFFICIENCY_RATE);
                hours * (efficiency / 100.0)
            })
            .sum();

        CapacityRecord {
            member_count: active_members.len(),
            total_capacity_hours,
            active_project_count,
            utilization_percent: stepped_utilization(active_project_count),
        }
    }
}

impl Default for UtilizationEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_member(id: &str, bay: Option<&str>, active: bool) -> TeamMember {
        TeamMember {
            id: id.to_string(),
            name: format!("member {}", id),
            bay_id: bay.map(|b| b.to_string()),
            is_active: active,
            hours_per_week: None,
            efficiency_rate: None,
        }
    }

    fn make_schedule(id: &str, bay: &str, project: &str, end: Option<NaiveDate>) -> ManufacturingSchedule {
        ManufacturingSchedule {
            id: id.to_string(),
            bay_id: bay.to_string(),
            project_id: project.to_string(),
            start_date: Some(make_date(2024, 1, 1)),
            end_date: end,
        }
    }

    fn make_project(id: &str, status: &str) -> Project {
        Project {
            id: id.to_string(),
            project_number: format!("N-{}", id),
            name: format!("project {}", id),
            status: Some(status.to_string()),
            ..Default::default()
        }
    }

    fn bays(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_stepped_utilization_thresholds() {
        // 固定业务口径: 0/1/2/≥3 → 0/75/100/120
        assert_eq!(stepped_utilization(0), 0.0);
        assert_eq!(stepped_utilization(1), 75.0);
        assert_eq!(stepped_utilization(2), 100.0);
        assert_eq!(stepped_utilization(3), 120.0);
        assert_eq!(stepped_utilization(4), 120.0);
        assert_eq!(stepped_utilization(17), 120.0);
    }

    #[test]
    fn test_empty_bays_all_zero() {
        let engine = UtilizationEngine::new();
        let record = engine.estimate_utilization(
            &[],
            &[make_member("TM-1", Some("BAY-1"), true)],
            &[make_schedule("S-1", "BAY-1", "P-1", None)],
            &[make_project("P-1", "In Production")],
            make_date(2024, 6, 1),
        );

        assert_eq!(record, CapacityRecord::empty());
    }

    #[test]
    fn test_active_project_counting() {
        let engine = UtilizationEngine::new();
        let as_of = make_date(2024, 6, 1);

        let schedules = vec![
            // 在制
            make_schedule("S-1", "BAY-1", "P-1", Some(make_date(2024, 7, 1))),
            // 已结束, 不计
            make_schedule("S-2", "BAY-1", "P-2", Some(make_date(2024, 5, 1))),
            // 结束日期缺失, 视为进行中
            make_schedule("S-3", "BAY-2", "P-3", None),
            // 其他班组工位, 不计
            make_schedule("S-4", "BAY-9", "P-4", None),
            // 同一项目第二条排程: project_id 去重
            make_schedule("S-5", "BAY-2", "P-1", Some(make_date(2024, 8, 1))),
        ];
        let projects = vec![
            make_project("P-1", "In Production"),
            make_project("P-2", "In Production"),
            make_project("P-3", "Planning"),
            make_project("P-4", "Planning"),
        ];

        let record = engine.estimate_utilization(
            &bays(&["BAY-1", "BAY-2"]),
            &[],
            &schedules,
            &projects,
            as_of,
        );

        assert_eq!(record.active_project_count, 2); // P-1, P-3
        assert_eq!(record.utilization_percent, 100.0);
        assert_eq!(record.member_count, 0);
        assert_eq!(record.total_capacity_hours, 0.0);
    }

    #[test]
    fn test_closed_projects_excluded() {
        let engine = UtilizationEngine::new();
        let as_of = make_date(2024, 6, 1);

        let schedules = vec![
            make_schedule("S-1", "BAY-1", "P-1", None),
            make_schedule("S-2", "BAY-1", "P-2", None),
            make_schedule("S-3", "BAY-1", "P-3", None),
        ];
        let projects = vec![
            make_project("P-1", "Delivered"),
            make_project("P-2", "Cancelled"),
            make_project("P-3", "In Production"),
        ];

        let record =
            engine.estimate_utilization(&bays(&["BAY-1"]), &[], &schedules, &projects, as_of);

        assert_eq!(record.active_project_count, 1);
        assert_eq!(record.utilization_percent, 75.0);
    }

    #[test]
    fn test_capacity_hours_with_defaults() {
        let engine = UtilizationEngine::new();

        let members = vec![
            // 缺省 40h × 100%
            make_member("TM-1", Some("BAY-1"), true),
            // 32h × 50%
            TeamMember {
                hours_per_week: Some(32.0),
                efficiency_rate: Some(50.0),
                ..make_member("TM-2", Some("BAY-1"), true)
            },
            // 离岗成员不计
            make_member("TM-3", Some("BAY-1"), false),
            // 其他工位不计
            make_member("TM-4", Some("BAY-9"), true),
            // 未指派工位不计
            make_member("TM-5", None, true),
        ];

        let record = engine.estimate_utilization(
            &bays(&["BAY-1"]),
            &members,
            &[],
            &[],
            make_date(2024, 6, 1),
        );

        assert_eq!(record.member_count, 2);
        assert_eq!(record.total_capacity_hours, 56.0); // 40 + 16
        assert_eq!(record.active_project_count, 0);
        assert_eq!(record.utilization_percent, 0.0);
    }

    #[test]
    fn test_step_sequence_0_through_4() {
        // 性质: 在制项目数 0..4 → 0/75/100/120/120, 与产能工时无关
        let engine = UtilizationEngine::new();
        let as_of = make_date(2024, 6, 1);
        let expected = [0.0, 75.0, 100.0, 120.0, 120.0];

        for count in 0..=4usize {
            let schedules: Vec<ManufacturingSchedule> = (0..count)
                .map(|i| make_schedule(&format!("S-{}", i), "BAY-1", &format!("P-{}", i), None))
                .collect();
            let projects: Vec<Project> = (0..count)
                .map(|i| make_project(&format!("P-{}", i), "In Production"))
                .collect();

            let record =
                engine.estimate_utilization(&bays(&["BAY-1"]), &[], &schedules, &projects, as_of);

            assert_eq!(record.active_project_count, count);
            assert_eq!(record.utilization_percent, expected[count]);
        }
    }

    #[test]
    fn test_schedule_ending_today_still_counts() {
        // 结束日期 == as_of: 仍在制 (≥ 判定)
        let engine = UtilizationEngine::new();
        let as_of = make_date(2024, 6, 1);

        let record = engine.estimate_utilization(
            &bays(&["BAY-1"]),
            &[],
            &[make_schedule("S-1", "BAY-1", "P-1", Some(as_of))],
            &[make_project("P-1", "In Production")],
            as_of,
        );

        assert_eq!(record.active_project_count, 1);
    }
}
