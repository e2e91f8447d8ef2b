// ==========================================
// 制造运营影响评估系统 - 进度偏差引擎
// ==========================================
// 职责: 按里程碑字段表计算基线/当前日期的天数偏差
// 输入: 项目记录 (只读)
// 输出: Variance 列表 (声明顺序, 不排序)
// ==========================================
// 红线: 无状态引擎, 纯函数; 单字段数据缺陷只隔离该字段
// ==========================================

use crate::domain::project::{Project, ScheduleField, SCHEDULE_FIELDS};
use crate::domain::types::DateValue;
use crate::domain::variance::Variance;

// ==========================================
// VarianceEngine - 进度偏差引擎
// ==========================================
pub struct VarianceEngine;

impl VarianceEngine {
    pub fn new() -> Self {
        Self
    }

    /// 计算全部里程碑字段的偏差 (固定字段表)
    pub fn compute_variances(&self, project: &Project) -> Vec<Variance> {
        self.compute_variances_for(project, &SCHEDULE_FIELDS)
    }

    /// 计算指定字段集的偏差
    ///
    /// 结果顺序与 `fields` 的声明顺序一致, 不按幅度排序
    /// (报告的关键路径视图自行重排, 属展示层行为)
    pub fn compute_variances_for(
        &self,
        project: &Project,
        fields: &[ScheduleField],
    ) -> Vec<Variance> {
        let mut variances = Vec::new();

        for field in fields {
            let baseline = match self.resolve_date(project, *field, true) {
                Some(d) => d,
                None => continue,
            };
            let current = match self.resolve_date(project, *field, false) {
                Some(d) => d,
                None => continue,
            };

            // 精确日历天减法, 不走浮点小时换算
            let days_difference = current.signed_duration_since(baseline).num_days();
            if days_difference == 0 {
                continue;
            }

            variances.push(Variance {
                field: *field,
                display_name: field.display_name().to_string(),
                baseline_date: baseline,
                current_date: current,
                days_difference,
                is_delayed: days_difference > 0,
            });
        }

        variances
    }

    /// 归一化并取出单侧日期
    ///
    /// Absent (缺失/哨兵) 静默跳过; Malformed 记录告警后跳过,
    /// 不得中断其余字段的处理
    fn resolve_date(
        &self,
        project: &Project,
        field: ScheduleField,
        baseline: bool,
    ) -> Option<chrono::NaiveDate> {
        let value = if baseline {
            field.baseline_value(project)
        } else {
            field.current_value(project)
        };

        match value {
            DateValue::Date(d) => Some(d),
            DateValue::Absent => None,
            DateValue::Malformed(raw) => {
                tracing::warn!(
                    project_number = %project.project_number,
                    field = ?field,
                    side = if baseline { "baseline" } else { "current" },
                    raw = %raw,
                    "里程碑日期无法解析, 该字段不参与偏差计算"
                );
                None
            }
        }
    }
}

impl Default for VarianceEngine {
    fn default() -> Self {
        Self::new()
    }
}
