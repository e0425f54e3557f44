use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::pagination::Page;
use crate::application::use_cases::jobs::create_job::{CreateJob, CreateJobInput};
use crate::application::use_cases::jobs::delete_job::DeleteJob;
use crate::application::use_cases::jobs::get_job::GetJob;
use crate::application::use_cases::jobs::list_jobs::{JobQuery, JobScope, ListJobs};
use crate::application::use_cases::jobs::list_locations::ListLocations;
use crate::application::use_cases::jobs::update_job::UpdateJob;
use crate::bootstrap::app_context::AppContext;
use crate::domain::jobs::job::{self as domain, JobChanges, JobStatus};
use crate::presentation::http::auth::AuthUser;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::extract::{
    JsonBody, PathParam, QueryParams, non_blank, parse_optional,
};
use crate::presentation::http::pagination::{PageMetaResponse, page_request};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatorSummary {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: Option<f64>,
    pub status: String,
    pub created_by: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub creator: Option<CreatorSummary>,
    pub application_count: i64,
}

impl From<domain::Job> for JobResponse {
    fn from(j: domain::Job) -> Self {
        JobResponse {
            id: j.id,
            title: j.title,
            description: j.description,
            location: j.location,
            salary: j.salary,
            status: j.status.as_str().to_string(),
            created_by: j.created_by,
            created_at: j.created_at,
            updated_at: j.updated_at,
            creator: j.creator.map(|c| CreatorSummary {
                id: c.id,
                full_name: c.full_name,
                email: c.email,
            }),
            application_count: j.application_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JobListResponse {
    pub data: Vec<JobResponse>,
    pub meta: PageMetaResponse,
}

impl From<Page<domain::Job>> for JobListResponse {
    fn from(p: Page<domain::Job>) -> Self {
        JobListResponse {
            data: p.data.into_iter().map(Into::into).collect(),
            meta: p.meta.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: Option<f64>,
    /// `open` (default) or `closed`
    #[schema(value_type = Option<String>)]
    pub status: Option<JobStatus>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    /// `null` clears the salary
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<f64>)]
    pub salary: DoubleOption<f64>,
    #[schema(value_type = Option<String>)]
    pub status: Option<JobStatus>,
}

impl Default for UpdateJobRequest {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            location: None,
            salary: DoubleOption::NotProvided,
            status: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum DoubleOption<T> {
    NotProvided,
    Null,
    Some(T),
}

fn deserialize_double_option<'de, D, T>(deserializer: D) -> Result<DoubleOption<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(|opt| match opt {
        None => DoubleOption::Null,
        Some(value) => DoubleOption::Some(value),
    })
}

impl<T> Default for DoubleOption<T> {
    fn default() -> Self {
        DoubleOption::NotProvided
    }
}

impl<T> DoubleOption<T> {
    fn into_patch(self) -> Option<Option<T>> {
        match self {
            DoubleOption::NotProvided => None,
            DoubleOption::Null => Some(None),
            DoubleOption::Some(v) => Some(Some(v)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListJobsQuery {
    pub search: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

async fn list_scoped(
    ctx: &AppContext,
    scope: JobScope<'_>,
    q: ListJobsQuery,
) -> Result<Json<JobListResponse>, ApiError> {
    let page = page_request(q.page, q.limit)?;
    let query = JobQuery {
        search: non_blank(q.search),
        location: non_blank(q.location),
        status: parse_optional("status", q.status)?,
    };
    let repo = ctx.job_repo();
    let uc = ListJobs {
        repo: repo.as_ref(),
    };
    let page = uc.execute(scope, query, page).await?;
    Ok(Json(page.into()))
}

#[utoipa::path(get, path = "/jobs", tag = "Jobs", security(()),
    params(
        ("search" = Option<String>, Query, description = "Matches title or description"),
        ("location" = Option<String>, Query, description = "Location contains"),
        ("status" = Option<String>, Query, description = "open | closed"),
        ("page" = Option<i64>, Query, description = "1-based page (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 10)")
    ),
    responses((status = 200, body = JobListResponse), (status = 400, body = ErrorBody)))]
pub async fn list_jobs(
    State(ctx): State<AppContext>,
    QueryParams(q): QueryParams<ListJobsQuery>,
) -> Result<Json<JobListResponse>, ApiError> {
    list_scoped(&ctx, JobScope::All, q).await
}

#[utoipa::path(get, path = "/jobs/open", tag = "Jobs", security(()),
    params(
        ("search" = Option<String>, Query, description = "Matches title or description"),
        ("location" = Option<String>, Query, description = "Location contains"),
        ("page" = Option<i64>, Query, description = "1-based page (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 10)")
    ),
    responses((status = 200, body = JobListResponse)))]
pub async fn list_open_jobs(
    State(ctx): State<AppContext>,
    QueryParams(q): QueryParams<ListJobsQuery>,
) -> Result<Json<JobListResponse>, ApiError> {
    list_scoped(&ctx, JobScope::Open, q).await
}

#[utoipa::path(get, path = "/jobs/my", tag = "Jobs",
    params(
        ("search" = Option<String>, Query, description = "Matches title or description"),
        ("location" = Option<String>, Query, description = "Location contains"),
        ("status" = Option<String>, Query, description = "open | closed"),
        ("page" = Option<i64>, Query, description = "1-based page (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 10)")
    ),
    responses((status = 200, body = JobListResponse), (status = 401, body = ErrorBody), (status = 403, body = ErrorBody)))]
pub async fn list_my_jobs(
    State(ctx): State<AppContext>,
    AuthUser(actor): AuthUser,
    QueryParams(q): QueryParams<ListJobsQuery>,
) -> Result<Json<JobListResponse>, ApiError> {
    list_scoped(&ctx, JobScope::OwnedBy(&actor), q).await
}

#[utoipa::path(get, path = "/jobs/locations", tag = "Jobs", security(()),
    responses((status = 200, body = [String])))]
pub async fn list_locations(State(ctx): State<AppContext>) -> Result<Json<Vec<String>>, ApiError> {
    let repo = ctx.job_repo();
    let uc = ListLocations {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute().await?))
}

#[utoipa::path(post, path = "/jobs", tag = "Jobs", request_body = CreateJobRequest,
    responses((status = 201, body = JobResponse), (status = 400, body = ErrorBody), (status = 403, body = ErrorBody)))]
pub async fn create_job(
    State(ctx): State<AppContext>,
    AuthUser(actor): AuthUser,
    JsonBody(req): JsonBody<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobResponse>), ApiError> {
    let repo = ctx.job_repo();
    let uc = CreateJob {
        repo: repo.as_ref(),
    };
    let input = CreateJobInput {
        title: req.title,
        description: req.description,
        location: req.location,
        salary: req.salary,
        status: req.status,
    };
    let job = uc.execute(&actor, input).await?;
    Ok((StatusCode::CREATED, Json(job.into())))
}

#[utoipa::path(get, path = "/jobs/{id}", tag = "Jobs", security(()),
    params(("id" = Uuid, Path, description = "Job ID")),
    responses((status = 200, body = JobResponse), (status = 404, body = ErrorBody)))]
pub async fn get_job(
    State(ctx): State<AppContext>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<JobResponse>, ApiError> {
    let repo = ctx.job_repo();
    let uc = GetJob {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

#[utoipa::path(patch, path = "/jobs/{id}", tag = "Jobs", request_body = UpdateJobRequest,
    params(("id" = Uuid, Path, description = "Job ID")),
    responses((status = 200, body = JobResponse), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn update_job(
    State(ctx): State<AppContext>,
    AuthUser(actor): AuthUser,
    PathParam(id): PathParam<Uuid>,
    JsonBody(req): JsonBody<UpdateJobRequest>,
) -> Result<Json<JobResponse>, ApiError> {
    let repo = ctx.job_repo();
    let uc = UpdateJob {
        repo: repo.as_ref(),
    };
    let changes = JobChanges {
        title: req.title,
        description: req.description,
        location: req.location,
        salary: req.salary.into_patch(),
        status: req.status,
    };
    Ok(Json(uc.execute(&actor, id, changes).await?.into()))
}

#[utoipa::path(delete, path = "/jobs/{id}", tag = "Jobs",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses((status = 200, body = JobResponse), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn delete_job(
    State(ctx): State<AppContext>,
    AuthUser(actor): AuthUser,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<JobResponse>, ApiError> {
    let repo = ctx.job_repo();
    let uc = DeleteJob {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(&actor, id).await?.into()))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/open", get(list_open_jobs))
        .route("/jobs/my", get(list_my_jobs))
        .route("/jobs/locations", get(list_locations))
        .route(
            "/jobs/:id",
            get(get_job).patch(update_job).delete(delete_job),
        )
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_patch_distinguishes_absent_null_and_value() {
        let absent: UpdateJobRequest = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert!(absent.salary.into_patch().is_none());

        let cleared: UpdateJobRequest = serde_json::from_str(r#"{"salary":null}"#).unwrap();
        assert_eq!(cleared.salary.into_patch(), Some(None));

        let set: UpdateJobRequest = serde_json::from_str(r#"{"salary":85000.5}"#).unwrap();
        assert_eq!(set.salary.into_patch(), Some(Some(85000.5)));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<CreateJobRequest>(r#"{"title":"x","owner":"me"}"#).is_err());
        assert!(serde_json::from_str::<UpdateJobRequest>(r#"{"createdBy":"me"}"#).is_err());
    }

    #[test]
    fn status_is_parsed_from_lowercase() {
        let req: CreateJobRequest =
            serde_json::from_str(r#"{"title":"t","description":"d","location":"l","status":"closed"}"#)
                .unwrap();
        assert_eq!(req.status, Some(JobStatus::Closed));
        assert!(serde_json::from_str::<CreateJobRequest>(r#"{"status":"paused"}"#).is_err());
    }
}
