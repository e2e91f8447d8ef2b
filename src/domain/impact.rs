// ==========================================
// 制造运营影响评估系统 - 部门影响实体与评估摘要
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::{Department, ImpactLevel};
use crate::domain::variance::Variance;

// ==========================================
// DepartmentImpact - 部门影响
// ==========================================
// 由固定规则表对偏差集求值产生 (engine::impact_rules)
// 同一部门在一次评估中最多出现一次
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentImpact {
    pub department: Department,
    pub impact_level: ImpactLevel,
    pub description: String,
    pub specific_impacts: Vec<String>,
    pub mitigation_actions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<String>,
    /// 触发偏差中的最大绝对天数, 格式 "<N> days"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline_impact: Option<String>,
}

// ==========================================
// AssessmentSummary - 评估摘要指标
// ==========================================
// 驾驶舱摘要卡片与报告指标瓦片共用同一份派生指标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSummary {
    pub variance_count: usize,
    pub delayed_count: usize,
    pub advanced_count: usize,
    pub department_count: usize,
    pub critical_count: usize,
    pub high_count: usize,
    /// 延期偏差中的最大天数 (无延期时为 0)
    pub max_delay_days: i64,
}

impl AssessmentSummary {
    /// 从偏差集与部门影响集派生摘要指标
    pub fn derive(variances: &[Variance], impacts: &[DepartmentImpact]) -> Self {
        let delayed_count = variances.iter().filter(|v| v.is_delayed).count();
        let max_delay_days = variances
            .iter()
            .filter(|v| v.is_delayed)
            .map(|v| v.days_difference)
            .max()
            .unwrap_or(0);

        Self {
            variance_count: variances.len(),
            delayed_count,
            advanced_count: variances.len() - delayed_count,
            department_count: impacts.len(),
            critical_count: impacts
                .iter()
                .filter(|i| i.impact_level == ImpactLevel::Critical)
                .count(),
            high_count: impacts
                .iter()
                .filter(|i| i.impact_level == ImpactLevel::High)
                .count(),
            max_delay_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::ScheduleField;
    use chrono::NaiveDate;

    fn make_variance(field: ScheduleField, days: i64) -> Variance {
        let baseline = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        Variance {
            field,
            display_name: field.display_name().to_string(),
            baseline_date: baseline,
            current_date: baseline + chrono::Duration::days(days),
            days_difference: days,
            is_delayed: days > 0,
        }
    }

    fn make_impact(department: Department, level: ImpactLevel) -> DepartmentImpact {
        DepartmentImpact {
            department,
            impact_level: level,
            description: "test".to_string(),
            specific_impacts: vec![],
            mitigation_actions: vec![],
            estimated_cost: None,
            timeline_impact: None,
        }
    }

    #[test]
    fn test_summary_counts() {
        let variances = vec![
            make_variance(ScheduleField::Ship, 12),
            make_variance(ScheduleField::PaintStart, 4),
            make_variance(ScheduleField::ChassisEta, -3),
        ];
        let impacts = vec![
            make_impact(Department::Fsw, ImpactLevel::Critical),
            make_impact(Department::Paint, ImpactLevel::High),
            make_impact(Department::Finance, ImpactLevel::Medium),
        ];

        let summary = AssessmentSummary::derive(&variances, &impacts);
        assert_eq!(summary.variance_count, 3);
        assert_eq!(summary.delayed_count, 2);
        assert_eq!(summary.advanced_count, 1);
        assert_eq!(summary.department_count, 3);
        assert_eq!(summary.critical_count, 1);
        assert_eq!(summary.high_count, 1);
        assert_eq!(summary.max_delay_days, 12);
    }

    #[test]
    fn test_summary_empty() {
        let summary = AssessmentSummary::derive(&[], &[]);
        assert_eq!(summary.variance_count, 0);
        assert_eq!(summary.delayed_count, 0);
        assert_eq!(summary.advanced_count, 0);
        assert_eq!(summary.department_count, 0);
        assert_eq!(summary.max_delay_days, 0);
    }

    #[test]
    fn test_max_delay_ignores_advances() {
        // 提前 20 天不得计入最大延期
        let variances = vec![
            make_variance(ScheduleField::Ship, -20),
            make_variance(ScheduleField::QcStart, 6),
        ];
        let summary = AssessmentSummary::derive(&variances, &[]);
        assert_eq!(summary.max_delay_days, 6);
    }
}
