// ==========================================
// 制造运营影响评估系统 - 数据访问层错误类型
// ==========================================
// 职责: 外部数据服务 (REST) 访问错误的统一分类
// ==========================================

use thiserror::Error;

/// 数据访问层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ==========================================
    // 传输层错误
    // ==========================================
    #[error("数据服务请求失败: {0}")]
    RequestError(String),

    #[error("数据服务返回异常状态: resource={resource}, status={status}")]
    ServiceStatus { resource: String, status: u16 },

    #[error("响应解析失败: resource={resource}, reason={reason}")]
    DecodeError { resource: String, reason: String },

    // ==========================================
    // 业务层错误
    // ==========================================
    #[error("资源未找到: {entity}(id={id})")]
    NotFound { entity: String, id: String },

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        RepositoryError::RequestError(err.to_string())
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = RepositoryError::NotFound {
            entity: "Project".to_string(),
            id: "P-404".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Project"));
        assert!(msg.contains("P-404"));

        let err = RepositoryError::ServiceStatus {
            resource: "projects".to_string(),
            status: 503,
        };
        assert!(err.to_string().contains("503"));
    }
}
