// ==========================================
// 制造运营影响评估系统 - 引擎层
// ==========================================
// 业务规则引擎: 全部为无状态纯函数
// 数据缺陷按字段隔离, 引擎本身从不报错
// ==========================================

pub mod impact_rules;
pub mod utilization;
pub mod variance;

pub use impact_rules::ImpactRulesEngine;
pub use utilization::{stepped_utilization, UtilizationEngine, UTILIZATION_STEPS};
pub use variance::VarianceEngine;
