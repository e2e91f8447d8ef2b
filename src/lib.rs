// ==========================================
// 制造运营影响评估系统 - 核心库
// ==========================================
// 技术栈: Rust + REST 数据服务 + PDF 报告
// 系统定位: 决策支持引擎 (进度偏差 → 部门影响 → 评估报告)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据访问层 - 外部 REST 数据服务 (只读)
pub mod repository;

// 引擎层 - 业务规则 (纯函数)
pub mod engine;

// AI 洞察适配层 - 外部叙事服务 + 本地回退
pub mod ai;

// 报告层 - 版面规划与 PDF 渲染
pub mod report;

// 配置层 - 运行配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DateValue, Department, ImpactLevel, InsightSeverity};

// 领域实体
pub use domain::{
    AiInsight, AssessmentSummary, CapacityRecord, DepartmentImpact, InsightEntry, InsightRequest,
    ManufacturingBay, ManufacturingSchedule, Project, ScheduleField, TeamMember, Variance,
    SCHEDULE_FIELDS,
};

// 引擎
pub use engine::{ImpactRulesEngine, UtilizationEngine, VarianceEngine};

// 报告
pub use report::{RenderedReport, ReportRenderer, ReportTheme};

// AI 洞察
pub use ai::{fallback_insight, InsightProvider, RestInsightProvider};

// API
pub use api::{AssessmentApi, CapacityApi, ImpactAssessment};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "制造运营影响评估系统";
