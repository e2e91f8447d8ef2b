// ==========================================
// 制造运营影响评估系统 - 项目实体与里程碑字段表
// ==========================================
// 职责: 项目记录 (REST 数据服务只读输入) + 13 组里程碑日期对的
//       显式映射表 (禁止字符串动态取字段)
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::DateValue;

// ==========================================
// Project - 项目记录
// ==========================================
// op_* 为基线 (原计划) 日期, 无前缀为当前日期
// 日期以原始字符串保存, 统一由 DateValue::normalize 归一化
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub project_number: String,
    pub name: String,
    /// 自由文本状态; "Delivered" / "Cancelled" 视为已关闭
    #[serde(default)]
    pub status: Option<String>,

    // ===== 合同 =====
    #[serde(default)]
    pub contract_date: Option<String>,
    #[serde(default)]
    pub op_contract_date: Option<String>,

    // ===== 底盘到货 =====
    #[serde(default)]
    pub chassis_eta: Option<String>,
    #[serde(default)]
    pub op_chassis_eta: Option<String>,

    // ===== 机加车间 =====
    #[serde(default)]
    pub mech_shop: Option<String>,
    #[serde(default)]
    pub op_mech_shop: Option<String>,

    // ===== 制造开工 =====
    #[serde(default)]
    pub fabrication_start: Option<String>,
    #[serde(default)]
    pub op_fabrication_start: Option<String>,

    // ===== 喷涂开工 =====
    #[serde(default)]
    pub paint_start: Option<String>,
    #[serde(default)]
    pub op_paint_start: Option<String>,

    // ===== 总装开工 =====
    #[serde(default)]
    pub production_start: Option<String>,
    #[serde(default)]
    pub op_production_start: Option<String>,

    // ===== IT 安装 =====
    #[serde(default)]
    pub it_start: Option<String>,
    #[serde(default)]
    pub op_it_start: Option<String>,

    // ===== 包覆 =====
    #[serde(default)]
    pub wrap_date: Option<String>,
    #[serde(default)]
    pub op_wrap_date: Option<String>,

    // ===== NTC 测试 =====
    #[serde(default)]
    pub ntc_testing_date: Option<String>,
    #[serde(default)]
    pub op_ntc_testing_date: Option<String>,

    // ===== 质检开始 =====
    #[serde(default)]
    pub qc_start_date: Option<String>,
    #[serde(default)]
    pub op_qc_start_date: Option<String>,

    // ===== 高层评审 =====
    #[serde(default)]
    pub executive_review_date: Option<String>,
    #[serde(default)]
    pub op_executive_review_date: Option<String>,

    // ===== 发运 =====
    #[serde(default)]
    pub ship_date: Option<String>,
    #[serde(default)]
    pub op_ship_date: Option<String>,

    // ===== 交付 =====
    #[serde(default)]
    pub delivery_date: Option<String>,
    #[serde(default)]
    pub op_delivery_date: Option<String>,
}

impl Project {
    /// 项目是否仍在制 (未交付且未取消)
    pub fn is_open(&self) -> bool {
        match self.status.as_deref() {
            Some(s) => !crate::domain::types::CLOSED_PROJECT_STATUSES.contains(&s),
            None => true,
        }
    }
}

// ==========================================
// ScheduleField - 里程碑字段枚举
// ==========================================
// 13 组受跟踪的基线/当前日期对
// 声明顺序即偏差结果的输出顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScheduleField {
    Contract,
    ChassisEta,
    MechShop,
    FabricationStart,
    PaintStart,
    ProductionStart,
    ItStart,
    Wrap,
    NtcTesting,
    QcStart,
    ExecutiveReview,
    Ship,
    Delivery,
}

/// 固定的里程碑字段表 (版本化: 增删字段需同步修改此表与 Project 实体)
pub const SCHEDULE_FIELDS: [ScheduleField; 13] = [
    ScheduleField::Contract,
    ScheduleField::ChassisEta,
    ScheduleField::MechShop,
    ScheduleField::FabricationStart,
    ScheduleField::PaintStart,
    ScheduleField::ProductionStart,
    ScheduleField::ItStart,
    ScheduleField::Wrap,
    ScheduleField::NtcTesting,
    ScheduleField::QcStart,
    ScheduleField::ExecutiveReview,
    ScheduleField::Ship,
    ScheduleField::Delivery,
];

impl ScheduleField {
    /// 报告中显示的阶段名称
    pub fn display_name(&self) -> &'static str {
        match self {
            ScheduleField::Contract => "Contract Date",
            ScheduleField::ChassisEta => "Chassis ETA",
            ScheduleField::MechShop => "Mech Shop",
            ScheduleField::FabricationStart => "Fabrication Start",
            ScheduleField::PaintStart => "Paint Start",
            ScheduleField::ProductionStart => "Production Start",
            ScheduleField::ItStart => "IT Start",
            ScheduleField::Wrap => "Wrap",
            ScheduleField::NtcTesting => "NTC Testing",
            ScheduleField::QcStart => "QC Start",
            ScheduleField::ExecutiveReview => "Executive Review",
            ScheduleField::Ship => "Ship Date",
            ScheduleField::Delivery => "Delivery Date",
        }
    }

    /// 基线 (原计划) 日期原始值
    pub fn baseline_raw<'a>(&self, project: &'a Project) -> Option<&'a str> {
        match self {
            ScheduleField::Contract => project.op_contract_date.as_deref(),
            ScheduleField::ChassisEta => project.op_chassis_eta.as_deref(),
            ScheduleField::MechShop => project.op_mech_shop.as_deref(),
            ScheduleField::FabricationStart => project.op_fabrication_start.as_deref(),
            ScheduleField::PaintStart => project.op_paint_start.as_deref(),
            ScheduleField::ProductionStart => project.op_production_start.as_deref(),
            ScheduleField::ItStart => project.op_it_start.as_deref(),
            ScheduleField::Wrap => project.op_wrap_date.as_deref(),
            ScheduleField::NtcTesting => project.op_ntc_testing_date.as_deref(),
            ScheduleField::QcStart => project.op_qc_start_date.as_deref(),
            ScheduleField::ExecutiveReview => project.op_executive_review_date.as_deref(),
            ScheduleField::Ship => project.op_ship_date.as_deref(),
            ScheduleField::Delivery => project.op_delivery_date.as_deref(),
        }
    }

    /// 当前日期原始值
    pub fn current_raw<'a>(&self, project: &'a Project) -> Option<&'a str> {
        match self {
            ScheduleField::Contract => project.contract_date.as_deref(),
            ScheduleField::ChassisEta => project.chassis_eta.as_deref(),
            ScheduleField::MechShop => project.mech_shop.as_deref(),
            ScheduleField::FabricationStart => project.fabrication_start.as_deref(),
            ScheduleField::PaintStart => project.paint_start.as_deref(),
            ScheduleField::ProductionStart => project.production_start.as_deref(),
            ScheduleField::ItStart => project.it_start.as_deref(),
            ScheduleField::Wrap => project.wrap_date.as_deref(),
            ScheduleField::NtcTesting => project.ntc_testing_date.as_deref(),
            ScheduleField::QcStart => project.qc_start_date.as_deref(),
            ScheduleField::ExecutiveReview => project.executive_review_date.as_deref(),
            ScheduleField::Ship => project.ship_date.as_deref(),
            ScheduleField::Delivery => project.delivery_date.as_deref(),
        }
    }

    /// 归一化后的基线日期
    pub fn baseline_value(&self, project: &Project) -> DateValue {
        DateValue::normalize(self.baseline_raw(project))
    }

    /// 归一化后的当前日期
    pub fn current_value(&self, project: &Project) -> DateValue {
        DateValue::normalize(self.current_raw(project))
    }
}
