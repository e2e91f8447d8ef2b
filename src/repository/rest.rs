// ==========================================
// 制造运营影响评估系统 - REST 数据网关
// ==========================================
// 职责: 从外部数据服务读取项目/工位/排程/成员记录 (只读)
// 本引擎不拥有持久层; 写操作属协作方, 不在此实现
// ==========================================

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::domain::capacity::{ManufacturingBay, ManufacturingSchedule, TeamMember};
use crate::domain::project::Project;
use crate::repository::error::{RepositoryError, RepositoryResult};

// ==========================================
// OpsDataSource - 数据源接口
// ==========================================
// 接口抽象用于测试替身 (内存实现见 tests/)
#[async_trait]
pub trait OpsDataSource: Send + Sync {
    /// 按 ID 读取项目
    async fn get_project(&self, project_id: &str) -> RepositoryResult<Project>;

    /// 读取全部项目
    async fn list_projects(&self) -> RepositoryResult<Vec<Project>>;

    /// 读取全部制造工位
    async fn list_bays(&self) -> RepositoryResult<Vec<ManufacturingBay>>;

    /// 读取全部工位排程
    async fn list_schedules(&self) -> RepositoryResult<Vec<ManufacturingSchedule>>;

    /// 读取全部班组成员
    async fn list_team_members(&self) -> RepositoryResult<Vec<TeamMember>>;
}

// ==========================================
// RestRepository - REST 数据网关实现
// ==========================================
pub struct RestRepository {
    client: Client,
    base_url: String,
}

impl RestRepository {
    /// 创建数据网关
    ///
    /// # 参数
    /// - `base_url`: 数据服务根地址 (末尾斜杠会被去除)
    /// - `timeout_secs`: 单请求超时
    pub fn new(base_url: &str, timeout_secs: u64) -> RepositoryResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET 单个资源并解析 JSON
    async fn get_json<T: DeserializeOwned>(&self, resource: &str) -> RepositoryResult<T> {
        let url = format!("{}/{}", self.base_url, resource);
        tracing::debug!(url = %url, "请求数据服务");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RepositoryError::NotFound {
                entity: resource.to_string(),
                id: String::new(),
            });
        }
        if !status.is_success() {
            tracing::error!(resource = %resource, status = %status, "数据服务返回异常状态");
            return Err(RepositoryError::ServiceStatus {
                resource: resource.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RepositoryError::DecodeError {
                resource: resource.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl OpsDataSource for RestRepository {
    async fn get_project(&self, project_id: &str) -> RepositoryResult<Project> {
        let resource = format!("projects/{}", project_id);
        self.get_json::<Project>(&resource)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound { .. } => RepositoryError::NotFound {
                    entity: "Project".to_string(),
                    id: project_id.to_string(),
                },
                other => other,
            })
    }

    async fn list_projects(&self) -> RepositoryResult<Vec<Project>> {
        self.get_json("projects").await
    }

    async fn list_bays(&self) -> RepositoryResult<Vec<ManufacturingBay>> {
        self.get_json("manufacturing-bays").await
    }

    async fn list_schedules(&self) -> RepositoryResult<Vec<ManufacturingSchedule>> {
        self.get_json("manufacturing-schedules").await
    }

    async fn list_team_members(&self) -> RepositoryResult<Vec<TeamMember>> {
        self.get_json("team-members").await
    }
}
