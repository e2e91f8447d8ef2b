// ==========================================
// 制造运营影响评估系统 - CLI 主入口
// ==========================================
// 用法: mfg-impact-assessment <项目ID>
// 流程: 加载配置 → 拉取项目 → 偏差/影响计算 → AI 洞察
//       → 渲染并保存 PDF 报告
// ==========================================

use std::sync::Arc;

use mfg_impact_assessment::ai::RestInsightProvider;
use mfg_impact_assessment::api::{AssessmentApi, CapacityApi};
use mfg_impact_assessment::config::AppConfig;
use mfg_impact_assessment::report::{ReportRenderer, ReportTheme};
use mfg_impact_assessment::repository::RestRepository;
use mfg_impact_assessment::{i18n, logging};

#[tokio::main]
async fn main() {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 决策支持引擎", mfg_impact_assessment::APP_NAME);
    tracing::info!("系统版本: {}", mfg_impact_assessment::VERSION);
    tracing::info!("==================================================");

    // 加载配置
    let config = AppConfig::load().expect("无法加载配置");
    i18n::set_locale(&config.locale);
    tracing::info!("数据服务: {}", config.data_service_url);
    tracing::info!("报告目录: {}", config.report_output_dir.display());

    // 命令行参数: 项目ID
    let project_id = match std::env::args().nth(1) {
        Some(id) => id,
        None => {
            eprintln!("用法: mfg-impact-assessment <项目ID>");
            std::process::exit(2);
        }
    };

    // 组装数据网关 / 洞察服务 / 评估 API
    let data_source = Arc::new(
        RestRepository::new(&config.data_service_url, config.data_timeout_secs)
            .expect("无法初始化数据网关"),
    );
    let insight_provider = Arc::new(
        RestInsightProvider::new(&config.insight_service_url, config.insight_timeout_secs)
            .expect("无法初始化洞察服务客户端"),
    );
    let assessment_api = AssessmentApi::new(
        data_source.clone(),
        insight_provider,
        ReportRenderer::new(ReportTheme::default()),
        config.report_output_dir.clone(),
    );

    // 评估加载
    println!(
        "{}",
        i18n::t_with_args("assessment.loading", &[("project_id", &project_id)])
    );
    let assessment = match assessment_api.load_assessment(&project_id).await {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(error = %e, "评估加载失败");
            eprintln!("{}: {}", i18n::t("common.failure"), e);
            std::process::exit(1);
        }
    };

    if assessment.summary.variance_count == 0 {
        println!("{}", i18n::t("assessment.no_variances"));
    } else {
        println!(
            "{}",
            i18n::t_with_args(
                "assessment.loaded",
                &[
                    ("variances", &assessment.summary.variance_count.to_string()),
                    (
                        "departments",
                        &assessment.summary.department_count.to_string()
                    ),
                ],
            )
        );
    }

    // 产能概览 (驾驶舱摘要)
    let capacity_api = CapacityApi::new(data_source);
    let today = chrono::Local::now().date_naive();
    match capacity_api.all_team_capacities(today).await {
        Ok(teams) => {
            for team in teams {
                println!(
                    "{}",
                    i18n::t_with_args(
                        "capacity.summary",
                        &[
                            ("team", &team.team),
                            ("members", &team.record.member_count.to_string()),
                            ("projects", &team.record.active_project_count.to_string()),
                            (
                                "utilization",
                                &format!("{:.0}", team.record.utilization_percent)
                            ),
                        ],
                    )
                );
            }
        }
        Err(e) => tracing::warn!(error = %e, "产能概览获取失败, 跳过"),
    }

    // 报告生成 (时钟只在此边界读取一次)
    println!("{}", i18n::t("report.generating"));
    let generated_at = chrono::Local::now().naive_local();
    match assessment_api.generate_report(&assessment, generated_at).await {
        Ok(path) => {
            println!(
                "{}",
                i18n::t_with_args("report.saved", &[("path", &path.display().to_string())])
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "报告生成失败");
            eprintln!("{}: {}", i18n::t("common.failure"), e);
            std::process::exit(1);
        }
    }
}
