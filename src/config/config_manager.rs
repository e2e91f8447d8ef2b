// ==========================================
// 制造运营影响评估系统 - 配置管理器
// ==========================================
// 职责: 运行配置的加载/保存与默认值
// 存储: JSON 文件 (用户配置目录)
// 说明: 业务口径常量 (利用率阶梯/规则表/瓦片阈值) 编译期固化
//       在引擎与报告层, 不进运行配置
// ==========================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 配置文件目录名
const CONFIG_DIR_NAME: &str = "mfg-impact-assessment";
/// 配置文件名
const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// AppConfig - 运行配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// 外部数据服务根地址
    pub data_service_url: String,
    /// AI 洞察服务地址 (POST)
    pub insight_service_url: String,
    /// 数据服务请求超时 (秒)
    pub data_timeout_secs: u64,
    /// 洞察服务请求超时 (秒)
    pub insight_timeout_secs: u64,
    /// 报告落盘目录
    pub report_output_dir: PathBuf,
    /// 界面语言 ("zh-CN" / "en")
    pub locale: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_service_url: "http://127.0.0.1:8080/api".to_string(),
            insight_service_url: "http://127.0.0.1:8080/api/impact-insights".to_string(),
            data_timeout_secs: 15,
            insight_timeout_secs: 30,
            report_output_dir: default_report_dir(),
            locale: "zh-CN".to_string(),
        }
    }
}

/// 默认报告目录: 用户文档目录下的 impact-reports
fn default_report_dir() -> PathBuf {
    dirs::document_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("impact-reports")
}

/// 默认配置文件路径
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

impl AppConfig {
    /// 从默认路径加载; 文件不存在时返回默认配置
    pub fn load() -> Result<Self> {
        let path = default_config_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::info!(path = %path.display(), "配置文件不存在, 使用默认配置");
            Ok(Self::default())
        }
    }

    /// 从指定路径加载
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("配置文件读取失败: {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&raw)
            .with_context(|| format!("配置文件解析失败: {}", path.display()))?;
        Ok(config)
    }

    /// 保存到指定路径 (目录不存在时创建)
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("配置目录创建失败: {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(self).context("配置序列化失败")?;
        std::fs::write(path, raw)
            .with_context(|| format!("配置文件写入失败: {}", path.display()))?;
        Ok(())
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.locale, "zh-CN");
        assert!(config.data_timeout_secs > 0);
        assert!(!config.data_service_url.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.locale = "en".to_string();
        config.data_service_url = "http://10.0.0.5:9000/api".to_string();

        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        // 旧版本配置缺字段: serde(default) 补默认值
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"locale": "en"}"#).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.locale, "en");
        assert_eq!(loaded.data_timeout_secs, AppConfig::default().data_timeout_secs);
    }
}
