// ==========================================
// 制造运营影响评估系统 - 影响评估 API
// ==========================================
// 职责: 编排评估全流程
//       项目加载 → 偏差计算 → 部门影响规则 → (有偏差时) AI 洞察
//       → 报告渲染与落盘
// 架构: API 层 → 引擎层 (纯函数) / 数据访问层 / 报告层
// ==========================================
// 并发口径: 偏差/影响计算为同步纯函数, 可重入;
//           报告生成为显式用户动作, 同一时刻只允许一次在途
//           (重复点击被忽略, 防止重复落盘副作用)
// ==========================================

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

use crate::ai::InsightProvider;
use crate::api::error::{ApiError, ApiResult};
use crate::domain::impact::{AssessmentSummary, DepartmentImpact};
use crate::domain::insight::{AiInsight, InsightRequest, ProjectSummary};
use crate::domain::project::Project;
use crate::domain::variance::Variance;
use crate::engine::{ImpactRulesEngine, VarianceEngine};
use crate::report::{RenderedReport, ReportRenderer};
use crate::repository::OpsDataSource;

// ==========================================
// ImpactAssessment - 一次评估的完整结果
// ==========================================
// 派生结果归本次评估会话所有, 不跨会话共享, 不持久化
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAssessment {
    /// 评估实例 ID (审计日志用)
    pub assessment_id: Uuid,
    pub project: Project,
    pub variances: Vec<Variance>,
    pub impacts: Vec<DepartmentImpact>,
    pub summary: AssessmentSummary,
    /// 有偏差时机会性获取; 服务不可用时为回退载荷, 从不缺失语义
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<AiInsight>,
}

// ==========================================
// RenderGate - 渲染在途闸门
// ==========================================
// 第二次点击在渲染在途时被拒绝而不是并发执行
pub(crate) struct RenderGate {
    in_flight: AtomicBool,
}

impl RenderGate {
    pub(crate) fn new() -> Self {
        Self {
            in_flight: AtomicBool::new(false),
        }
    }

    /// 尝试占用; 已有渲染在途时返回 None
    pub(crate) fn try_acquire(&self) -> Option<RenderGuard<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Some(RenderGuard { gate: self })
        } else {
            None
        }
    }
}

/// RAII 释放: 成功/失败/panic 都归还闸门
pub(crate) struct RenderGuard<'a> {
    gate: &'a RenderGate,
}

impl Drop for RenderGuard<'_> {
    fn drop(&mut self) {
        self.gate.in_flight.store(false, Ordering::Release);
    }
}

// ==========================================
// AssessmentApi - 影响评估 API
// ==========================================
pub struct AssessmentApi {
    data_source: Arc<dyn OpsDataSource>,
    insight_provider: Arc<dyn InsightProvider>,
    variance_engine: VarianceEngine,
    rules_engine: ImpactRulesEngine,
    renderer: ReportRenderer,
    report_output_dir: PathBuf,
    render_gate: RenderGate,
}

impl AssessmentApi {
    /// 创建影响评估 API
    ///
    /// # 参数
    /// - `data_source`: 外部数据服务网关
    /// - `insight_provider`: AI 洞察服务适配器
    /// - `renderer`: 报告渲染器 (主题作为显式配置注入)
    /// - `report_output_dir`: 报告落盘目录
    pub fn new(
        data_source: Arc<dyn OpsDataSource>,
        insight_provider: Arc<dyn InsightProvider>,
        renderer: ReportRenderer,
        report_output_dir: PathBuf,
    ) -> Self {
        Self {
            data_source,
            insight_provider,
            variance_engine: VarianceEngine::new(),
            rules_engine: ImpactRulesEngine::new(),
            renderer,
            report_output_dir,
            render_gate: RenderGate::new(),
        }
    }

    // ==========================================
    // 评估加载
    // ==========================================

    /// 加载并计算一次完整评估
    ///
    /// 偏差/影响为同步纯计算; AI 洞察仅在存在偏差时机会性获取,
    /// 服务失败由适配层兜底, 不影响评估结果
    pub async fn load_assessment(&self, project_id: &str) -> ApiResult<ImpactAssessment> {
        if project_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("项目ID不能为空".to_string()));
        }

        let project = self.data_source.get_project(project_id).await?;
        let mut assessment = self.compute_assessment(project);

        if !assessment.variances.is_empty() {
            let request = InsightRequest {
                project_summary: ProjectSummary {
                    project_number: assessment.project.project_number.clone(),
                    name: assessment.project.name.clone(),
                    status: assessment.project.status.clone(),
                },
                variances: assessment.variances.clone(),
                department_impacts: assessment.impacts.clone(),
            };
            assessment.insights = Some(self.insight_provider.fetch_insights(&request).await);
        }

        tracing::info!(
            assessment_id = %assessment.assessment_id,
            project_number = %assessment.project.project_number,
            variances = assessment.summary.variance_count,
            departments = assessment.summary.department_count,
            "评估加载完成"
        );

        Ok(assessment)
    }

    /// 同步纯计算: 偏差 + 部门影响 + 摘要 (可重入, 随输入变化重算)
    pub fn compute_assessment(&self, project: Project) -> ImpactAssessment {
        let variances = self.variance_engine.compute_variances(&project);
        let impacts = self.rules_engine.derive_impacts(&variances);
        let summary = AssessmentSummary::derive(&variances, &impacts);

        ImpactAssessment {
            assessment_id: Uuid::new_v4(),
            project,
            variances,
            impacts,
            summary,
            insights: None,
        }
    }

    // ==========================================
    // 报告生成 (唯一副作用)
    // ==========================================

    /// 渲染报告并落盘
    ///
    /// # 返回
    /// 报告文件完整路径
    ///
    /// # 幂等性
    /// 重复调用对同名文件整体覆写, 绝不产生损坏的部分文件;
    /// 渲染在途时的并发调用返回 `ApiError::ReportInProgress`
    pub async fn generate_report(
        &self,
        assessment: &ImpactAssessment,
        generated_at: NaiveDateTime,
    ) -> ApiResult<PathBuf> {
        let _guard = self.render_gate.try_acquire().ok_or_else(|| {
            tracing::warn!(
                project_number = %assessment.project.project_number,
                "报告生成请求被忽略: 上一次渲染尚未结束"
            );
            ApiError::ReportInProgress
        })?;

        // 渲染到内存; 任何渲染失败都不会产生落盘文件
        let rendered: RenderedReport = self.renderer.render(
            &assessment.project,
            &assessment.variances,
            &assessment.impacts,
            assessment.insights.as_ref(),
            generated_at,
        )?;

        std::fs::create_dir_all(&self.report_output_dir).map_err(|e| {
            ApiError::ReportWriteError {
                path: self.report_output_dir.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        let path = self.report_output_dir.join(&rendered.file_name);
        std::fs::write(&path, &rendered.bytes).map_err(|e| ApiError::ReportWriteError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::info!(
            path = %path.display(),
            pages = rendered.page_count,
            "报告已保存"
        );

        Ok(path)
    }
}
