//! Progress analytics handlers.
//!
//! `progress` covers every project the caller can see; `overview` covers
//! only the projects they own.

use actix_web::{get, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::TaskStatus;
use crate::domain::analytics::{OverviewStats, ProgressStats, ProjectProgress, TrendPoint};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStatsResponse {
    pub total_tasks: u64,
    pub todo_tasks: u64,
    pub in_progress_tasks: u64,
    pub completed_tasks: u64,
    pub overdue_tasks: u64,
    /// Percentage with two decimals.
    #[schema(example = 66.67)]
    pub completion_rate: f64,
}

impl From<ProgressStats> for ProgressStatsResponse {
    fn from(stats: ProgressStats) -> Self {
        Self {
            total_tasks: stats.total_tasks,
            todo_tasks: stats.todo_tasks,
            in_progress_tasks: stats.in_progress_tasks,
            completed_tasks: stats.completed_tasks,
            overdue_tasks: stats.overdue_tasks,
            completion_rate: stats.completion_rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProgressResponse {
    pub project_id: Uuid,
    pub project_title: String,
    pub stats: ProgressStatsResponse,
}

impl From<ProjectProgress> for ProjectProgressResponse {
    fn from(entry: ProjectProgress) -> Self {
        Self {
            project_id: *entry.project_id.as_uuid(),
            project_title: entry.project_title,
            stats: entry.stats.into(),
        }
    }
}

/// Task counts keyed by status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct StatusDistributionResponse {
    #[serde(rename = "To Do")]
    pub to_do: u64,
    #[serde(rename = "In Progress")]
    pub in_progress: u64,
    #[serde(rename = "Done")]
    pub done: u64,
}

impl FromIterator<(TaskStatus, u64)> for StatusDistributionResponse {
    fn from_iter<I: IntoIterator<Item = (TaskStatus, u64)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::default(), |mut acc, (status, count)| {
                match status {
                    TaskStatus::ToDo => acc.to_do = count,
                    TaskStatus::InProgress => acc.in_progress = count,
                    TaskStatus::Done => acc.done = count,
                }
                acc
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendPointResponse {
    #[schema(example = "2026-05-20")]
    pub date: NaiveDate,
    pub tasks_created: u64,
}

impl From<TrendPoint> for TrendPointResponse {
    fn from(point: TrendPoint) -> Self {
        Self {
            date: point.date,
            tasks_created: point.tasks_created,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub total_projects: u64,
    #[serde(flatten)]
    pub stats: ProgressStatsResponse,
    pub status_distribution: StatusDistributionResponse,
    /// Seven daily points, oldest first, ending today (UTC).
    pub recent_tasks_trend: Vec<TrendPointResponse>,
}

impl From<OverviewStats> for OverviewResponse {
    fn from(summary: OverviewStats) -> Self {
        Self {
            total_projects: summary.total_projects,
            status_distribution: summary.status_distribution().into_iter().collect(),
            stats: summary.stats.into(),
            recent_tasks_trend: summary
                .recent_tasks_trend
                .into_iter()
                .map(TrendPointResponse::from)
                .collect(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/progress",
    responses(
        (status = 200, description = "Per-project progress", body = [ProjectProgressResponse]),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["analytics"],
    operation_id = "projectProgress"
)]
#[get("/analytics/progress")]
pub async fn progress(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ProjectProgressResponse>>> {
    let actor = session.require_user_id()?;
    let entries = state.analytics.progress(&actor).await?;
    Ok(web::Json(
        entries
            .into_iter()
            .map(ProjectProgressResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/overview",
    responses(
        (status = 200, description = "Totals across owned projects", body = OverviewResponse),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["analytics"],
    operation_id = "analyticsOverview"
)]
#[get("/analytics/overview")]
pub async fn overview(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<OverviewResponse>> {
    let actor = session.require_user_id()?;
    let summary = state.analytics.overview(&actor).await?;
    Ok(web::Json(OverviewResponse::from(summary)))
}
