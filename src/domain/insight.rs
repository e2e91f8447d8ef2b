// ==========================================
// 制造运营影响评估系统 - AI 洞察实体
// ==========================================
// 外部叙事生成服务的不透明载荷
// 视为不可信/可选输入: 缺失或失败不得阻塞评估流程
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::impact::DepartmentImpact;
use crate::domain::types::InsightSeverity;
use crate::domain::variance::Variance;

// ==========================================
// AiInsight - 洞察载荷
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiInsight {
    pub insights: Vec<InsightEntry>,
    /// 置信度, 区间 [0, 1]
    pub confidence: f64,
    pub summary: String,
}

/// 单条洞察
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightEntry {
    pub severity: InsightSeverity,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

// ==========================================
// InsightRequest - 洞察服务请求载荷
// ==========================================
// POST {项目摘要, 偏差集, 部门影响集}
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightRequest {
    pub project_summary: ProjectSummary,
    pub variances: Vec<Variance>,
    pub department_impacts: Vec<DepartmentImpact>,
}

/// 请求中携带的项目标识摘要
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub project_number: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
