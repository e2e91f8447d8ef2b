// ==========================================
// 制造运营影响评估系统 - API 层错误类型
// ==========================================
// 职责: 定义 API 层错误类型, 把数据访问/渲染层错误
//       转换为用户友好的业务错误
// 红线: 所有错误信息必须包含显式原因 (可解释性)
// ==========================================

use thiserror::Error;

use crate::report::ReportError;
use crate::repository::RepositoryError;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    /// 上一次报告生成尚未结束, 本次请求被忽略 (防重复落盘)
    #[error("报告正在生成中, 请稍候重试")]
    ReportInProgress,

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据服务错误: {0}")]
    DataServiceError(String),

    // ==========================================
    // 报告生成错误
    // ==========================================
    #[error("报告生成失败: {0}")]
    RenderError(String),

    #[error("报告写入失败: path={path}, reason={reason}")]
    ReportWriteError { path: String, reason: String },

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 RepositoryError 转换
// 目的: 把数据访问层的技术错误转换为用户友好的业务错误
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::RequestError(msg) => ApiError::DataServiceError(msg),
            RepositoryError::ServiceStatus { resource, status } => {
                ApiError::DataServiceError(format!("{} 返回状态 {}", resource, status))
            }
            RepositoryError::DecodeError { resource, reason } => {
                ApiError::DataServiceError(format!("{} 响应解析失败: {}", resource, reason))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        ApiError::RenderError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_conversion() {
        let repo_err = RepositoryError::NotFound {
            entity: "Project".to_string(),
            id: "P-9".to_string(),
        };
        let api_err: ApiError = repo_err.into();
        match api_err {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("Project"));
                assert!(msg.contains("P-9"));
            }
            _ => panic!("Expected NotFound"),
        }

        let repo_err = RepositoryError::ServiceStatus {
            resource: "projects".to_string(),
            status: 500,
        };
        let api_err: ApiError = repo_err.into();
        match api_err {
            ApiError::DataServiceError(msg) => assert!(msg.contains("500")),
            _ => panic!("Expected DataServiceError"),
        }
    }
}
