// ==========================================
// 制造运营影响评估系统 - 产能 API
// ==========================================
// 职责: 按班组聚合工位, 委托产能利用率引擎计算
// 架构: API 层 → 引擎层 (纯函数) / 数据访问层
// ==========================================

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::api::error::ApiResult;
use crate::domain::capacity::CapacityRecord;
use crate::engine::UtilizationEngine;
use crate::repository::OpsDataSource;

/// 单个班组的产能视图
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamCapacity {
    pub team: String,
    pub bay_ids: Vec<String>,
    pub record: CapacityRecord,
}

// ==========================================
// CapacityApi - 产能 API
// ==========================================
pub struct CapacityApi {
    data_source: Arc<dyn OpsDataSource>,
    engine: UtilizationEngine,
}

impl CapacityApi {
    pub fn new(data_source: Arc<dyn OpsDataSource>) -> Self {
        Self {
            data_source,
            engine: UtilizationEngine::new(),
        }
    }

    /// 指定工位集的产能记录
    ///
    /// # 参数
    /// - `team_bay_ids`: 班组负责的工位集 (空集返回全零记录)
    /// - `as_of`: 截止日期 (显式传入, 不读时钟)
    pub async fn team_capacity(
        &self,
        team_bay_ids: &[String],
        as_of: NaiveDate,
    ) -> ApiResult<CapacityRecord> {
        let members = self.data_source.list_team_members().await?;
        let schedules = self.data_source.list_schedules().await?;
        let projects = self.data_source.list_projects().await?;

        Ok(self
            .engine
            .estimate_utilization(team_bay_ids, &members, &schedules, &projects, as_of))
    }

    /// 全部班组的产能视图 (按工位记录上的班组名聚合)
    ///
    /// 未指派班组的工位不计入任何班组; 结果按班组名排序,
    /// 相同输入得到相同输出
    pub async fn all_team_capacities(&self, as_of: NaiveDate) -> ApiResult<Vec<TeamCapacity>> {
        let bays = self.data_source.list_bays().await?;
        let members = self.data_source.list_team_members().await?;
        let schedules = self.data_source.list_schedules().await?;
        let projects = self.data_source.list_projects().await?;

        // 班组名 → 工位集 (BTreeMap 保证稳定顺序)
        let mut teams: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for bay in &bays {
            if let Some(team) = &bay.team {
                teams.entry(team.clone()).or_default().push(bay.id.clone());
            }
        }

        let capacities = teams
            .into_iter()
            .map(|(team, bay_ids)| {
                let record = self.engine.estimate_utilization(
                    &bay_ids, &members, &schedules, &projects, as_of,
                );
                TeamCapacity {
                    team,
                    bay_ids,
                    record,
                }
            })
            .collect();

        Ok(capacities)
    }
}
