// ==========================================
// 制造运营影响评估系统 - 领域层
// ==========================================
// 实体与类型: 外部只读记录 + 本引擎的派生值
// ==========================================

pub mod capacity;
pub mod impact;
pub mod insight;
pub mod project;
pub mod types;
pub mod variance;

pub use capacity::{CapacityRecord, ManufacturingBay, ManufacturingSchedule, TeamMember};
pub use impact::{AssessmentSummary, DepartmentImpact};
pub use insight::{AiInsight, InsightEntry, InsightRequest, ProjectSummary};
pub use project::{Project, ScheduleField, SCHEDULE_FIELDS};
pub use types::{DateValue, Department, ImpactLevel, InsightSeverity};
pub use variance::Variance;
