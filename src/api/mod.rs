// ==========================================
// 制造运营影响评估系统 - API 层
// ==========================================
// 业务接口门面: 前端/CLI 统一经此层调用引擎与数据访问
// ==========================================

pub mod assessment_api;
pub mod capacity_api;
pub mod error;

pub use assessment_api::{AssessmentApi, ImpactAssessment};
pub use capacity_api::{CapacityApi, TeamCapacity};
pub use error::{ApiError, ApiResult};
