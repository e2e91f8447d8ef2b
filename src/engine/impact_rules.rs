// ==========================================
// 制造运营影响评估系统 - 部门影响规则引擎
// ==========================================
// 职责: 对偏差集求值固定规则表, 产出分级的部门影响列表
// 输入: Variance 列表
// 输出: DepartmentImpact 列表 (按影响等级降序, 同级保持规则表顺序)
// ==========================================
// 红线: 纯函数, 无外部状态/时钟/随机性
//       相同输入必须得到逐字节相同的输出
// 规则表为硬编码业务口径, 按原样保留, 不得"修正"
// ==========================================

use crate::domain::impact::DepartmentImpact;
use crate::domain::project::ScheduleField;
use crate::domain::types::{Department, ImpactLevel};
use crate::domain::variance::Variance;

// ==========================================
// ImpactRulesEngine - 部门影响规则引擎
// ==========================================
pub struct ImpactRulesEngine;

// 销售成本区间: 合同日期本身延期时取宽区间
const SALES_COST_CONTRACT_DELAYED: &str = "$50,000 - $150,000";
const SALES_COST_DEFAULT: &str = "$10,000 - $50,000";

impl ImpactRulesEngine {
    pub fn new() -> Self {
        Self
    }

    /// 求值全部规则
    ///
    /// 规则相互独立, 所有命中的规则都触发; 空偏差集产出空结果,
    /// 绝不凭空制造部门影响
    pub fn derive_impacts(&self, variances: &[Variance]) -> Vec<DepartmentImpact> {
        if variances.is_empty() {
            return Vec::new();
        }

        let mut impacts: Vec<DepartmentImpact> = [
            self.evaluate_sales(variances),
            self.evaluate_engineering(variances),
            self.evaluate_supply_chain(variances),
            self.evaluate_finance(variances),
            self.evaluate_fabrication(variances),
            self.evaluate_paint(variances),
            self.evaluate_production(variances),
            self.evaluate_it(variances),
            self.evaluate_ntc(variances),
            self.evaluate_qc(variances),
            self.evaluate_fsw(variances),
        ]
        .into_iter()
        .flatten()
        .collect();

        // 排名: 影响等级降序, 同级保持规则表顺序 (稳定排序保证确定性)
        impacts.sort_by(|a, b| b.impact_level.cmp(&a.impact_level));
        impacts
    }

    // ==========================================
    // 规则求值 (每部门一条)
    // ==========================================

    /// Sales: 任一延期即触发; 合同日期延期时升为 high 并取宽成本区间
    fn evaluate_sales(&self, variances: &[Variance]) -> Option<DepartmentImpact> {
        let delayed: Vec<&Variance> = variances.iter().filter(|v| v.is_delayed).collect();
        if delayed.is_empty() {
            return None;
        }

        let contract_delayed = field_is_delayed(variances, ScheduleField::Contract);
        let (impact_level, estimated_cost) = if contract_delayed {
            (ImpactLevel::High, SALES_COST_CONTRACT_DELAYED)
        } else {
            (ImpactLevel::Medium, SALES_COST_DEFAULT)
        };

        Some(DepartmentImpact {
            department: Department::Sales,
            impact_level,
            description: "Schedule slips shift the customer-facing commitment dates and require \
                          proactive communication with the buyer."
                .to_string(),
            specific_impacts: vec![
                "Customer delivery commitments need to be re-confirmed".to_string(),
                "Contract penalty clauses may be triggered by late delivery".to_string(),
                "Downstream order pipeline planning loses accuracy".to_string(),
            ],
            mitigation_actions: vec![
                "Notify the customer of the revised timeline within 48 hours".to_string(),
                "Review contract terms for penalty exposure".to_string(),
                "Offer interim status reporting to preserve the relationship".to_string(),
            ],
            estimated_cost: Some(estimated_cost.to_string()),
            timeline_impact: timeline_over(&delayed),
        })
    }

    /// Engineering: 底盘到货或制造开工延期
    fn evaluate_engineering(&self, variances: &[Variance]) -> Option<DepartmentImpact> {
        let triggering: Vec<&Variance> = variances
            .iter()
            .filter(|v| {
                v.is_delayed
                    && matches!(
                        v.field,
                        ScheduleField::ChassisEta | ScheduleField::FabricationStart
                    )
            })
            .collect();
        if triggering.is_empty() {
            return None;
        }

        Some(DepartmentImpact {
            department: Department::Engineering,
            impact_level: ImpactLevel::Medium,
            description: "Late chassis arrival or fabrication start compresses the engineering \
                          release window for drawings and change orders."
                .to_string(),
            specific_impacts: vec![
                "Drawing release sequence must be re-prioritized".to_string(),
                "Pending engineering change orders lose float".to_string(),
            ],
            mitigation_actions: vec![
                "Re-sequence drawing releases against the new start dates".to_string(),
                "Fast-track open change orders on the affected phases".to_string(),
            ],
            estimated_cost: None,
            timeline_impact: timeline_over(&triggering),
        })
    }

    /// Supply Chain: 底盘到货或机加车间存在任何偏差 (延期或提前均触发)
    fn evaluate_supply_chain(&self, variances: &[Variance]) -> Option<DepartmentImpact> {
        let triggering: Vec<&Variance> = variances
            .iter()
            .filter(|v| matches!(v.field, ScheduleField::ChassisEta | ScheduleField::MechShop))
            .collect();
        if triggering.is_empty() {
            return None;
        }

        Some(DepartmentImpact {
            department: Department::SupplyChain,
            impact_level: ImpactLevel::High,
            description: "Chassis or mech-shop movement in either direction invalidates material \
                          arrival sequencing and staging plans."
                .to_string(),
            specific_impacts: vec![
                "Inbound material deliveries are no longer aligned with shop need dates"
                    .to_string(),
                "Staging and laydown space plans require rework".to_string(),
                "Expedite fees are likely on long-lead components".to_string(),
            ],
            mitigation_actions: vec![
                "Re-align purchase order need dates with the revised schedule".to_string(),
                "Confirm storage capacity for early arrivals".to_string(),
                "Escalate long-lead items at risk to the buyer team".to_string(),
            ],
            estimated_cost: None,
            timeline_impact: timeline_over(&triggering),
        })
    }

    /// Finance: 任一延期即触发
    fn evaluate_finance(&self, variances: &[Variance]) -> Option<DepartmentImpact> {
        let delayed: Vec<&Variance> = variances.iter().filter(|v| v.is_delayed).collect();
        if delayed.is_empty() {
            return None;
        }

        Some(DepartmentImpact {
            department: Department::Finance,
            impact_level: ImpactLevel::Medium,
            description: "Delayed milestones move billing triggers and shift revenue recognition \
                          across reporting periods."
                .to_string(),
            specific_impacts: vec![
                "Milestone billing dates slip with the schedule".to_string(),
                "Cash-flow forecast for the quarter requires revision".to_string(),
            ],
            mitigation_actions: vec![
                "Update the revenue recognition forecast".to_string(),
                "Flag affected billing milestones to accounts receivable".to_string(),
            ],
            estimated_cost: None,
            timeline_impact: timeline_over(&delayed),
        })
    }

    /// Fabrication: 制造开工延期
    fn evaluate_fabrication(&self, variances: &[Variance]) -> Option<DepartmentImpact> {
        let triggering = delayed_on(variances, ScheduleField::FabricationStart)?;

        Some(DepartmentImpact {
            department: Department::Fabrication,
            impact_level: ImpactLevel::Critical,
            description: "A late fabrication start consumes shop float directly and puts every \
                          downstream production phase at risk."
                .to_string(),
            specific_impacts: vec![
                "Weld and assembly labor loading must be re-leveled".to_string(),
                "Bay occupancy conflicts with the next scheduled unit".to_string(),
                "Overtime is required to hold the downstream dates".to_string(),
            ],
            mitigation_actions: vec![
                "Re-level the fabrication crew loading immediately".to_string(),
                "Evaluate second-shift or weekend coverage".to_string(),
                "Re-confirm bay hand-off dates with production control".to_string(),
            ],
            estimated_cost: None,
            timeline_impact: timeline_over(&[triggering]),
        })
    }

    /// Paint: 喷涂开工延期
    fn evaluate_paint(&self, variances: &[Variance]) -> Option<DepartmentImpact> {
        let triggering = delayed_on(variances, ScheduleField::PaintStart)?;

        Some(DepartmentImpact {
            department: Department::Paint,
            impact_level: ImpactLevel::High,
            description: "A late paint start disrupts booth scheduling and cure-time windows \
                          shared across active units."
                .to_string(),
            specific_impacts: vec![
                "Paint booth slots must be re-booked".to_string(),
                "Cure and re-coat windows compress against wrap".to_string(),
            ],
            mitigation_actions: vec![
                "Re-book booth time and notify adjacent units".to_string(),
                "Verify material shelf life against the new window".to_string(),
            ],
            estimated_cost: None,
            timeline_impact: timeline_over(&[triggering]),
        })
    }

    /// Production: 总装开工延期
    fn evaluate_production(&self, variances: &[Variance]) -> Option<DepartmentImpact> {
        let triggering = delayed_on(variances, ScheduleField::ProductionStart)?;

        Some(DepartmentImpact {
            department: Department::Production,
            impact_level: ImpactLevel::Critical,
            description: "A late production start threatens the committed ship date with minimal \
                          remaining float."
                .to_string(),
            specific_impacts: vec![
                "Final assembly sequence loses its schedule buffer".to_string(),
                "Crew assignments across concurrent units need rebalancing".to_string(),
                "Ship date protection requires compression of test phases".to_string(),
            ],
            mitigation_actions: vec![
                "Rebalance crews from lower-priority units".to_string(),
                "Compress non-critical checkout steps where quality allows".to_string(),
                "Hold a daily schedule-recovery standup until float is restored".to_string(),
            ],
            estimated_cost: None,
            timeline_impact: timeline_over(&[triggering]),
        })
    }

    /// IT: IT 安装延期
    fn evaluate_it(&self, variances: &[Variance]) -> Option<DepartmentImpact> {
        let triggering = delayed_on(variances, ScheduleField::ItStart)?;

        Some(DepartmentImpact {
            department: Department::It,
            impact_level: ImpactLevel::Medium,
            description: "A late IT install start narrows the integration and burn-in window \
                          before NTC testing."
                .to_string(),
            specific_impacts: vec![
                "Network and console integration time is reduced".to_string(),
                "Burn-in coverage may be shortened".to_string(),
            ],
            mitigation_actions: vec![
                "Pre-stage and bench-test equipment before the unit is available".to_string(),
                "Coordinate overlap with NTC to protect test coverage".to_string(),
            ],
            estimated_cost: None,
            timeline_impact: timeline_over(&[triggering]),
        })
    }

    /// NTC: NTC 测试延期
    fn evaluate_ntc(&self, variances: &[Variance]) -> Option<DepartmentImpact> {
        let triggering = delayed_on(variances, ScheduleField::NtcTesting)?;

        Some(DepartmentImpact {
            department: Department::Ntc,
            impact_level: ImpactLevel::High,
            description: "A late NTC test start risks the certification window and downstream QC \
                          hand-off."
                .to_string(),
            specific_impacts: vec![
                "Certification test slots must be rescheduled".to_string(),
                "Defect rework time before QC is reduced".to_string(),
            ],
            mitigation_actions: vec![
                "Reserve a contingency test slot".to_string(),
                "Pre-run available subsystem tests in parallel".to_string(),
            ],
            estimated_cost: None,
            timeline_impact: timeline_over(&[triggering]),
        })
    }

    /// QC: 质检开始延期
    fn evaluate_qc(&self, variances: &[Variance]) -> Option<DepartmentImpact> {
        let triggering = delayed_on(variances, ScheduleField::QcStart)?;

        Some(DepartmentImpact {
            department: Department::Qc,
            impact_level: ImpactLevel::High,
            description: "A late QC start leaves less time for punch-list resolution before \
                          executive review and ship."
                .to_string(),
            specific_impacts: vec![
                "Inspection staffing must be reallocated".to_string(),
                "Punch-list closure window compresses".to_string(),
            ],
            mitigation_actions: vec![
                "Stage in-process inspections ahead of final QC".to_string(),
                "Pre-assign rework crews for fast punch-list turnaround".to_string(),
            ],
            estimated_cost: None,
            timeline_impact: timeline_over(&[triggering]),
        })
    }

    /// FSW: 高层评审 / 发运 / 交付任一延期
    fn evaluate_fsw(&self, variances: &[Variance]) -> Option<DepartmentImpact> {
        let triggering: Vec<&Variance> = variances
            .iter()
            .filter(|v| {
                v.is_delayed
                    && matches!(
                        v.field,
                        ScheduleField::ExecutiveReview
                            | ScheduleField::Ship
                            | ScheduleField::Delivery
                    )
            })
            .collect();
        if triggering.is_empty() {
            return None;
        }

        Some(DepartmentImpact {
            department: Department::Fsw,
            impact_level: ImpactLevel::Critical,
            description: "End-of-line slips move the field service window and the customer \
                          hand-off itself."
                .to_string(),
            specific_impacts: vec![
                "Field service travel and install crew bookings must move".to_string(),
                "Customer acceptance and training dates require renegotiation".to_string(),
                "Warranty clock and support commitments shift".to_string(),
            ],
            mitigation_actions: vec![
                "Re-book field crews against the revised delivery date".to_string(),
                "Coordinate a revised acceptance plan with the customer".to_string(),
                "Confirm logistics carrier availability for the new ship window".to_string(),
            ],
            estimated_cost: None,
            timeline_impact: timeline_over(&triggering),
        })
    }
}

impl Default for ImpactRulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 谓词辅助
// ==========================================

/// 指定字段是否存在延期偏差
fn field_is_delayed(variances: &[Variance], field: ScheduleField) -> bool {
    variances.iter().any(|v| v.field == field && v.is_delayed)
}

/// 指定字段的延期偏差 (单字段规则用)
fn delayed_on(variances: &[Variance], field: ScheduleField) -> Option<&Variance> {
    variances.iter().find(|v| v.field == field && v.is_delayed)
}

/// 触发偏差集上的最大绝对天数, 格式 "<N> days"
fn timeline_over(triggering: &[&Variance]) -> Option<String> {
    triggering
        .iter()
        .map(|v| v.days_difference.abs())
        .max()
        .map(|n| format!("{} days", n))
}
