// ==========================================
// 制造运营影响评估系统 - 产能领域实体
// ==========================================
// 班组 / 工位 / 排程记录为外部数据服务的只读输入
// CapacityRecord 为派生值, 每次读取时实时重算, 从不保存快照
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// TeamMember - 班组成员
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    /// 指派的工位 (未指派则不计入任何班组)
    #[serde(default)]
    pub bay_id: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// 周工时, 缺省按 40 小时
    #[serde(default)]
    pub hours_per_week: Option<f64>,
    /// 效率系数 (百分比), 缺省按 100
    #[serde(default)]
    pub efficiency_rate: Option<f64>,
}

fn default_true() -> bool {
    true
}

/// 周工时缺省值
pub const DEFAULT_HOURS_PER_WEEK: f64 = 40.0;

/// 效率系数缺省值 (百分比)
pub const DEFAULT_EFFICIENCY_RATE: f64 = 100.0;

// ==========================================
// ManufacturingBay - 制造工位
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturingBay {
    pub id: String,
    pub name: String,
    /// 所属班组名 (产能按班组聚合时使用)
    #[serde(default)]
    pub team: Option<String>,
}

// ==========================================
// ManufacturingSchedule - 工位排程
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturingSchedule {
    pub id: String,
    pub bay_id: String,
    pub project_id: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// 结束日期缺失视为仍在进行
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

// ==========================================
// CapacityRecord - 班组产能记录 (派生)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityRecord {
    pub member_count: usize,
    pub total_capacity_hours: f64,
    pub active_project_count: usize,
    /// 阶梯式利用率 (百分比), 见 engine::utilization
    pub utilization_percent: f64,
}

impl CapacityRecord {
    /// 无工位/无成员班组的全零记录
    pub fn empty() -> Self {
        Self {
            member_count: 0,
            total_capacity_hours: 0.0,
            active_project_count: 0,
            utilization_percent: 0.0,
        }
    }
}
