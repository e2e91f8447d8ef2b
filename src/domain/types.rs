// ==========================================
// 制造运营影响评估系统 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 影响等级 (Impact Level)
// ==========================================
// 红线: 等级制,不是评分制
// 顺序: Low < Medium < High < Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,      // 轻微
    Medium,   // 关注
    High,     // 严重
    Critical, // 红线
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpactLevel::Low => write!(f, "low"),
            ImpactLevel::Medium => write!(f, "medium"),
            ImpactLevel::High => write!(f, "high"),
            ImpactLevel::Critical => write!(f, "critical"),
        }
    }
}

// ==========================================
// 受影响部门 (Department)
// ==========================================
// 规则表中的 11 个组织部门,每个部门在一次评估中最多出现一次
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    Sales,
    Engineering,
    SupplyChain,
    Finance,
    Fabrication,
    Paint,
    Production,
    It,
    Ntc,
    Qc,
    Fsw,
}

impl Department {
    /// 报告中显示的部门名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Department::Sales => "Sales",
            Department::Engineering => "Engineering",
            Department::SupplyChain => "Supply Chain",
            Department::Finance => "Finance",
            Department::Fabrication => "Fabrication",
            Department::Paint => "Paint",
            Department::Production => "Production",
            Department::It => "IT",
            Department::Ntc => "NTC",
            Department::Qc => "QC",
            Department::Fsw => "FSW",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ==========================================
// 洞察严重度 (Insight Severity)
// ==========================================
// AI 洞察服务返回的条目级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightSeverity {
    Info,    // 提示
    Warning, // 警告
    Danger,  // 危险
}

impl fmt::Display for InsightSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsightSeverity::Info => write!(f, "info"),
            InsightSeverity::Warning => write!(f, "warning"),
            InsightSeverity::Danger => write!(f, "danger"),
        }
    }
}

// ==========================================
// 日期值 (Date Value)
// ==========================================
// 原始日期字符串的统一归一化结果:
// 哨兵值 (N/A / PENDING / TBD / 空) → Absent
// 无法解析 → Malformed (按字段隔离,记录日志后跳过)
// 其余 → Date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateValue {
    Absent,
    Malformed(String),
    Date(chrono::NaiveDate),
}

/// 哨兵值集合: 表示"日期尚未确定",不参与偏差计算
pub const DATE_SENTINELS: [&str; 3] = ["N/A", "PENDING", "TBD"];

/// 已关闭的项目状态: 不计入在制项目数
pub const CLOSED_PROJECT_STATUSES: [&str; 2] = ["Delivered", "Cancelled"];

impl DateValue {
    /// 归一化单个原始日期值
    ///
    /// 接受 `YYYY-MM-DD` 或 RFC 3339 (取日期部分)
    pub fn normalize(raw: Option<&str>) -> DateValue {
        let raw = match raw {
            Some(r) => r.trim(),
            None => return DateValue::Absent,
        };

        if raw.is_empty() || DATE_SENTINELS.contains(&raw) {
            return DateValue::Absent;
        }

        if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return DateValue::Date(date);
        }

        // REST 数据服务偶尔返回完整时间戳,取日期部分
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
            return DateValue::Date(dt.date_naive());
        }

        DateValue::Malformed(raw.to_string())
    }

    /// 取日期 (Absent/Malformed 返回 None)
    pub fn as_date(&self) -> Option<chrono::NaiveDate> {
        match self {
            DateValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_impact_level_ordering() {
        assert!(ImpactLevel::Low < ImpactLevel::Medium);
        assert!(ImpactLevel::Medium < ImpactLevel::High);
        assert!(ImpactLevel::High < ImpactLevel::Critical);
    }

    #[test]
    fn test_department_display_names() {
        assert_eq!(Department::SupplyChain.display_name(), "Supply Chain");
        assert_eq!(Department::It.display_name(), "IT");
        assert_eq!(Department::Fsw.display_name(), "FSW");
    }

    #[test]
    fn test_normalize_sentinels() {
        assert_eq!(DateValue::normalize(None), DateValue::Absent);
        assert_eq!(DateValue::normalize(Some("")), DateValue::Absent);
        assert_eq!(DateValue::normalize(Some("  ")), DateValue::Absent);
        assert_eq!(DateValue::normalize(Some("N/A")), DateValue::Absent);
        assert_eq!(DateValue::normalize(Some("PENDING")), DateValue::Absent);
        assert_eq!(DateValue::normalize(Some("TBD")), DateValue::Absent);
    }

    #[test]
    fn test_normalize_plain_date() {
        assert_eq!(
            DateValue::normalize(Some("2024-03-10")),
            DateValue::Date(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap())
        );
    }

    #[test]
    fn test_normalize_rfc3339_takes_date_part() {
        assert_eq!(
            DateValue::normalize(Some("2024-03-10T08:30:00Z")),
            DateValue::Date(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap())
        );
    }

    #[test]
    fn test_normalize_malformed() {
        assert_eq!(
            DateValue::normalize(Some("03/10/2024")),
            DateValue::Malformed("03/10/2024".to_string())
        );
        assert_eq!(
            DateValue::normalize(Some("soon")),
            DateValue::Malformed("soon".to_string())
        );
    }

    #[test]
    fn test_impact_level_serde_lowercase() {
        let json = serde_json::to_string(&ImpactLevel::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
        let back: ImpactLevel = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(back, ImpactLevel::High);
    }
}
