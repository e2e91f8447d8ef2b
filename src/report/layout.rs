// ==========================================
// 制造运营影响评估系统 - 报告版面规划
// ==========================================
// 职责: 把评估结果编排为有序的报告区块序列 (纯函数)
// 绘制 (分页/坐标) 由 renderer 负责; 区块顺序是输出契约:
// 标题 → 项目信息 → 指标瓦片 → 执行摘要 → 偏差表
// → 部门区块 → AI 洞察
// ==========================================

use chrono::NaiveDateTime;

use crate::domain::impact::{AssessmentSummary, DepartmentImpact};
use crate::domain::insight::AiInsight;
use crate::domain::project::Project;
use crate::domain::variance::Variance;
use crate::report::theme::{
    department_tile_tone, max_delay_tile_tone, variance_tile_tone, TileTone,
};

/// 报告产品名 (页脚)
pub const PRODUCT_NAME: &str = "Mfg Impact Assessment";

// ==========================================
// 报告区块
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum ReportBlock {
    Title,
    ProjectInfo {
        name: String,
        project_number: String,
        generated_at: String,
    },
    MetricTiles {
        tiles: [MetricTile; 3],
    },
    ExecutiveSummary {
        text: String,
    },
    VarianceTable {
        rows: Vec<VarianceRow>,
    },
    DepartmentSection {
        impact: DepartmentImpact,
    },
    InsightBlock {
        insight: AiInsight,
    },
}

/// 指标瓦片
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTile {
    pub label: String,
    pub value: String,
    pub caption: String,
    pub tone: TileTone,
}

/// 偏差表行
#[derive(Debug, Clone, PartialEq)]
pub struct VarianceRow {
    pub phase: String,
    pub baseline_date: String,
    pub current_date: String,
    pub signed_days: String,
    pub direction_label: String,
    pub is_delayed: bool,
}

// ==========================================
// 版面规划
// ==========================================

/// 编排报告区块序列
///
/// 偏差表按 |天数| 降序 (关键路径视图) — 仅展示层重排,
/// 不改变偏差计算的输出顺序契约
pub fn plan(
    project: &Project,
    variances: &[Variance],
    impacts: &[DepartmentImpact],
    insights: Option<&AiInsight>,
    generated_at: NaiveDateTime,
) -> Vec<ReportBlock> {
    let summary = AssessmentSummary::derive(variances, impacts);

    let mut blocks = vec![
        ReportBlock::Title,
        ReportBlock::ProjectInfo {
            name: project.name.clone(),
            project_number: project.project_number.clone(),
            generated_at: generated_at.format("%Y-%m-%d %H:%M").to_string(),
        },
        ReportBlock::MetricTiles {
            tiles: build_tiles(&summary),
        },
        ReportBlock::ExecutiveSummary {
            text: executive_summary_text(&summary),
        },
        ReportBlock::VarianceTable {
            rows: build_variance_rows(variances),
        },
    ];

    for impact in impacts {
        blocks.push(ReportBlock::DepartmentSection {
            impact: impact.clone(),
        });
    }

    if let Some(insight) = insights {
        blocks.push(ReportBlock::InsightBlock {
            insight: insight.clone(),
        });
    }

    blocks
}

/// 三块指标瓦片: 偏差数 / 受影响部门数 / 最大延期
fn build_tiles(summary: &AssessmentSummary) -> [MetricTile; 3] {
    [
        MetricTile {
            label: "Schedule Variances".to_string(),
            value: summary.variance_count.to_string(),
            caption: format!(
                "{} delayed / {} advanced",
                summary.delayed_count, summary.advanced_count
            ),
            tone: variance_tile_tone(summary),
        },
        MetricTile {
            label: "Departments Impacted".to_string(),
            value: summary.department_count.to_string(),
            caption: format!(
                "{} critical / {} high",
                summary.critical_count, summary.high_count
            ),
            tone: department_tile_tone(summary),
        },
        MetricTile {
            label: "Max Delay".to_string(),
            value: format!("{} days", summary.max_delay_days),
            caption: "largest single milestone slip".to_string(),
            tone: max_delay_tile_tone(summary),
        },
    ]
}

/// 执行摘要段落 (与瓦片使用同一份派生指标)
fn executive_summary_text(summary: &AssessmentSummary) -> String {
    if summary.variance_count == 0 {
        return "Schedule analysis found no variance between the baseline and current \
                milestone dates. No department impacts were identified; the project is \
                tracking to plan."
            .to_string();
    }

    format!(
        "Schedule analysis identified {} variance(s) across the tracked milestones \
         ({} delayed, {} advanced). {} department(s) are impacted ({} critical, {} high). \
         The largest single milestone slip is {} day(s).",
        summary.variance_count,
        summary.delayed_count,
        summary.advanced_count,
        summary.department_count,
        summary.critical_count,
        summary.high_count,
        summary.max_delay_days,
    )
}

/// 偏差表行, 按 |天数| 降序 (关键路径视图)
fn build_variance_rows(variances: &[Variance]) -> Vec<VarianceRow> {
    let mut sorted: Vec<&Variance> = variances.iter().collect();
    sorted.sort_by_key(|v| std::cmp::Reverse(v.days_difference.abs()));

    sorted
        .into_iter()
        .map(|v| VarianceRow {
            phase: v.display_name.clone(),
            baseline_date: v.baseline_date.format("%Y-%m-%d").to_string(),
            current_date: v.current_date.format("%Y-%m-%d").to_string(),
            signed_days: v.signed_days(),
            direction_label: v.direction_label().to_string(),
            is_delayed: v.is_delayed,
        })
        .collect()
}
