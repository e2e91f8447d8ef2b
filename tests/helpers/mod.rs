// ==========================================
// 集成测试辅助: 实体构造器 + 内存数据源
// ==========================================
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;

use mfg_impact_assessment::ai::{fallback_insight, InsightProvider};
use mfg_impact_assessment::domain::capacity::{
    ManufacturingBay, ManufacturingSchedule, TeamMember,
};
use mfg_impact_assessment::domain::insight::{AiInsight, InsightRequest};
use mfg_impact_assessment::domain::project::Project;
use mfg_impact_assessment::repository::{OpsDataSource, RepositoryError, RepositoryResult};

pub fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ==========================================
// 项目构造器
// ==========================================

/// 制造开工延期 9 天 + 发运延期 19 天的项目
pub fn delayed_project() -> Project {
    Project {
        id: "P-1".to_string(),
        project_number: "24-117".to_string(),
        name: "Mobile Command Unit".to_string(),
        status: Some("In Production".to_string()),
        op_fabrication_start: Some("2024-03-01".to_string()),
        fabrication_start: Some("2024-03-10".to_string()),
        op_ship_date: Some("2024-06-01".to_string()),
        ship_date: Some("2024-06-20".to_string()),
        ..Default::default()
    }
}

/// 全部 13 对日期一致的项目 (零偏差)
pub fn on_time_project() -> Project {
    let date = "2024-04-01".to_string();
    Project {
        id: "P-2".to_string(),
        project_number: "24-200".to_string(),
        name: "On-Time Unit".to_string(),
        status: Some("In Production".to_string()),
        contract_date: Some(date.clone()),
        op_contract_date: Some(date.clone()),
        chassis_eta: Some(date.clone()),
        op_chassis_eta: Some(date.clone()),
        mech_shop: Some(date.clone()),
        op_mech_shop: Some(date.clone()),
        fabrication_start: Some(date.clone()),
        op_fabrication_start: Some(date.clone()),
        paint_start: Some(date.clone()),
        op_paint_start: Some(date.clone()),
        production_start: Some(date.clone()),
        op_production_start: Some(date.clone()),
        it_start: Some(date.clone()),
        op_it_start: Some(date.clone()),
        wrap_date: Some(date.clone()),
        op_wrap_date: Some(date.clone()),
        ntc_testing_date: Some(date.clone()),
        op_ntc_testing_date: Some(date.clone()),
        qc_start_date: Some(date.clone()),
        op_qc_start_date: Some(date.clone()),
        executive_review_date: Some(date.clone()),
        op_executive_review_date: Some(date.clone()),
        ship_date: Some(date.clone()),
        op_ship_date: Some(date.clone()),
        delivery_date: Some(date.clone()),
        op_delivery_date: Some(date),
        ..Default::default()
    }
}

pub fn make_status_project(id: &str, status: &str) -> Project {
    Project {
        id: id.to_string(),
        project_number: format!("N-{}", id),
        name: format!("project {}", id),
        status: Some(status.to_string()),
        ..Default::default()
    }
}

pub fn make_member(id: &str, bay: Option<&str>, active: bool) -> TeamMember {
    TeamMember {
        id: id.to_string(),
        name: format!("member {}", id),
        bay_id: bay.map(|b| b.to_string()),
        is_active: active,
        hours_per_week: None,
        efficiency_rate: None,
    }
}

pub fn make_schedule(
    id: &str,
    bay: &str,
    project: &str,
    end: Option<NaiveDate>,
) -> ManufacturingSchedule {
    ManufacturingSchedule {
        id: id.to_string(),
        bay_id: bay.to_string(),
        project_id: project.to_string(),
        start_date: Some(make_date(2024, 1, 1)),
        end_date: end,
    }
}

pub fn make_bay(id: &str, team: Option<&str>) -> ManufacturingBay {
    ManufacturingBay {
        id: id.to_string(),
        name: format!("Bay {}", id),
        team: team.map(|t| t.to_string()),
    }
}

// ==========================================
// InMemoryDataSource - 内存数据源替身
// ==========================================
#[derive(Default)]
pub struct InMemoryDataSource {
    pub projects: Vec<Project>,
    pub bays: Vec<ManufacturingBay>,
    pub schedules: Vec<ManufacturingSchedule>,
    pub members: Vec<TeamMember>,
}

#[async_trait]
impl OpsDataSource for InMemoryDataSource {
    async fn get_project(&self, project_id: &str) -> RepositoryResult<Project> {
        self.projects
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "Project".to_string(),
                id: project_id.to_string(),
            })
    }

    async fn list_projects(&self) -> RepositoryResult<Vec<Project>> {
        Ok(self.projects.clone())
    }

    async fn list_bays(&self) -> RepositoryResult<Vec<ManufacturingBay>> {
        Ok(self.bays.clone())
    }

    async fn list_schedules(&self) -> RepositoryResult<Vec<ManufacturingSchedule>> {
        Ok(self.schedules.clone())
    }

    async fn list_team_members(&self) -> RepositoryResult<Vec<TeamMember>> {
        Ok(self.members.clone())
    }
}

// ==========================================
// CountingInsightProvider - 洞察服务替身
// ==========================================
// 记录调用次数, 返回固定回退载荷
pub struct CountingInsightProvider {
    pub calls: AtomicUsize,
}

impl CountingInsightProvider {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InsightProvider for CountingInsightProvider {
    fn provider(&self) -> &str {
        "counting-stub"
    }

    async fn fetch_insights(&self, _request: &InsightRequest) -> AiInsight {
        self.calls.fetch_add(1, Ordering::SeqCst);
        fallback_insight()
    }
}
