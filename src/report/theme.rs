// ==========================================
// 制造运营影响评估系统 - 报告主题
// ==========================================
// 职责: 报告配色与指标瓦片的阈值着色规则
// 主题作为显式配置传入渲染器, 渲染器不读任何环境状态
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::impact::AssessmentSummary;
use crate::domain::types::{ImpactLevel, InsightSeverity};

// ==========================================
// 瓦片着色阈值 (固定业务口径)
// ==========================================
/// 最大延期 > 10 天: 红
pub const MAX_DELAY_RED_THRESHOLD: i64 = 10;
/// 最大延期 > 5 天: 琥珀
pub const MAX_DELAY_AMBER_THRESHOLD: i64 = 5;

// ==========================================
// 色调 (Tile Tone)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileTone {
    Danger,  // 红
    Warning, // 琥珀
    Success, // 绿
    Info,    // 蓝
}

/// 偏差瓦片: 存在延期即红, 否则绿
pub fn variance_tile_tone(summary: &AssessmentSummary) -> TileTone {
    if summary.delayed_count > 0 {
        TileTone::Danger
    } else {
        TileTone::Success
    }
}

/// 部门瓦片: 任一 critical 红; 否则任一 high 琥珀; 否则蓝
pub fn department_tile_tone(summary: &AssessmentSummary) -> TileTone {
    if summary.critical_count > 0 {
        TileTone::Danger
    } else if summary.high_count > 0 {
        TileTone::Warning
    } else {
        TileTone::Info
    }
}

/// 最大延期瓦片: >10 红, >5 琥珀, 否则绿
pub fn max_delay_tile_tone(summary: &AssessmentSummary) -> TileTone {
    if summary.max_delay_days > MAX_DELAY_RED_THRESHOLD {
        TileTone::Danger
    } else if summary.max_delay_days > MAX_DELAY_AMBER_THRESHOLD {
        TileTone::Warning
    } else {
        TileTone::Success
    }
}

/// 影响等级 → 色调 (部门区块标签着色)
pub fn impact_level_tone(level: ImpactLevel) -> TileTone {
    match level {
        ImpactLevel::Critical => TileTone::Danger,
        ImpactLevel::High => TileTone::Warning,
        ImpactLevel::Medium => TileTone::Info,
        ImpactLevel::Low => TileTone::Success,
    }
}

/// 洞察严重度 → 色调
pub fn insight_severity_tone(severity: InsightSeverity) -> TileTone {
    match severity {
        InsightSeverity::Danger => TileTone::Danger,
        InsightSeverity::Warning => TileTone::Warning,
        InsightSeverity::Info => TileTone::Info,
    }
}

// ==========================================
// ThemeColor - RGB 颜色 (0..1)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemeColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl ThemeColor {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

// ==========================================
// ReportTheme - 报告主题
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTheme {
    pub danger: ThemeColor,
    pub warning: ThemeColor,
    pub success: ThemeColor,
    pub info: ThemeColor,
    pub text: ThemeColor,
    pub muted: ThemeColor,
}

impl ReportTheme {
    /// 色调对应的主题色
    pub fn color_for(&self, tone: TileTone) -> ThemeColor {
        match tone {
            TileTone::Danger => self.danger,
            TileTone::Warning => self.warning,
            TileTone::Success => self.success,
            TileTone::Info => self.info,
        }
    }
}

impl Default for ReportTheme {
    fn default() -> Self {
        Self {
            danger: ThemeColor::new(0.80, 0.16, 0.15),
            warning: ThemeColor::new(0.90, 0.60, 0.10),
            success: ThemeColor::new(0.16, 0.59, 0.29),
            info: ThemeColor::new(0.14, 0.39, 0.74),
            text: ThemeColor::new(0.10, 0.10, 0.12),
            muted: ThemeColor::new(0.45, 0.45, 0.48),
        }
    }
}
