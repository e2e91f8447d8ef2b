// ==========================================
// 制造运营影响评估系统 - 洞察服务 Provider
// ==========================================
// 职责: 调用外部叙事生成服务; 失败时返回固定回退载荷
// 说明: 远端文本允许逐次不同 (非确定性), 是全系统唯一豁免
//       确定性要求的组件; 回退载荷本身是确定性的
// ==========================================

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::domain::insight::{AiInsight, InsightEntry, InsightRequest};
use crate::domain::types::InsightSeverity;

/// 回退载荷的固定置信度
pub const FALLBACK_CONFIDENCE: f64 = 0.8;

// ==========================================
// InsightProvider - 洞察服务接口
// ==========================================
#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// 服务提供方名称
    fn provider(&self) -> &str;

    /// 获取叙事洞察
    ///
    /// 永不失败: 网络错误 / 非 2xx / 载荷损坏 一律记录日志并
    /// 返回固定回退载荷, 报告渲染方总能拿到可用的洞察块
    async fn fetch_insights(&self, request: &InsightRequest) -> AiInsight;
}

// ==========================================
// RestInsightProvider - REST 洞察服务实现
// ==========================================
pub struct RestInsightProvider {
    client: Client,
    endpoint: String,
}

impl RestInsightProvider {
    /// 创建洞察服务客户端
    ///
    /// # 参数
    /// - `endpoint`: 洞察服务完整地址 (POST)
    /// - `timeout_secs`: 请求超时
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("洞察服务客户端构建失败")?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    /// 实际调用 (内部可失败, 由 fetch_insights 兜底)
    async fn call_service(&self, request: &InsightRequest) -> Result<AiInsight> {
        tracing::debug!(
            endpoint = %self.endpoint,
            variance_count = request.variances.len(),
            impact_count = request.department_impacts.len(),
            "调用洞察服务"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .context("洞察服务请求发送失败")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("洞察服务返回 {}: {}", status, body);
        }

        response
            .json::<AiInsight>()
            .await
            .context("洞察服务响应解析失败")
    }
}

#[async_trait]
impl InsightProvider for RestInsightProvider {
    fn provider(&self) -> &str {
        "rest"
    }

    async fn fetch_insights(&self, request: &InsightRequest) -> AiInsight {
        match self.call_service(request).await {
            Ok(insight) => {
                tracing::debug!(
                    entries = insight.insights.len(),
                    confidence = insight.confidence,
                    "洞察服务响应成功"
                );
                insight
            }
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "洞察服务不可用, 使用本地回退载荷");
                fallback_insight()
            }
        }
    }
}

// ==========================================
// 本地回退载荷
// ==========================================

/// 固定回退载荷: 两条通用 warning/danger 洞察, 置信度 0.8
pub fn fallback_insight() -> AiInsight {
    AiInsight {
        insights: vec![
            InsightEntry {
                severity: InsightSeverity::Warning,
                text: "Schedule variances were detected on tracked milestones; downstream \
                       departments should review their staffing and sequencing assumptions."
                    .to_string(),
                detail: None,
            },
            InsightEntry {
                severity: InsightSeverity::Danger,
                text: "Automated narrative analysis was unavailable for this assessment; the \
                       department impact table above remains authoritative."
                    .to_string(),
                detail: None,
            },
        ],
        confidence: FALLBACK_CONFIDENCE,
        summary: "Narrative insight service unreachable - generic guidance applied.".to_string(),
    }
}
