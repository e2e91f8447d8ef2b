// ==========================================
// 制造运营影响评估系统 - 进度偏差实体
// ==========================================
// 偏差为派生值: 随项目记录变化重算, 从不持久化
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::project::ScheduleField;

// ==========================================
// Variance - 单个里程碑的进度偏差
// ==========================================
// days_difference = 当前日期 - 基线日期 (整数天)
// 不变式: is_delayed == (days_difference > 0); 不存在 0 天偏差
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variance {
    pub field: ScheduleField,
    pub display_name: String,
    pub baseline_date: NaiveDate,
    pub current_date: NaiveDate,
    pub days_difference: i64,
    pub is_delayed: bool,
}

impl Variance {
    /// 带符号的天数文本: 延期为 "+N", 提前为 "-N"
    pub fn signed_days(&self) -> String {
        if self.days_difference > 0 {
            format!("+{}", self.days_difference)
        } else {
            format!("{}", self.days_difference)
        }
    }

    /// 延期/提前标签
    pub fn direction_label(&self) -> &'static str {
        if self.is_delayed {
            "Delayed"
        } else {
            "Advanced"
        }
    }
}
