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
use crate::application::use_cases::applications::apply::{ApplyInput, ApplyToJob};
use crate::application::use_cases::applications::delete_application::DeleteApplication;
use crate::application::use_cases::applications::get_application::GetApplication;
use crate::application::use_cases::applications::has_applied::HasApplied;
use crate::application::use_cases::applications::list_applications::{
    ApplicationQuery, ApplicationScope, ListApplications,
};
use crate::application::use_cases::applications::list_job_applications::ListJobApplications;
use crate::application::use_cases::applications::update_application::UpdateApplication;
use crate::bootstrap::app_context::AppContext;
use crate::domain::applications::application::{
    Application, ApplicationChanges, ApplicationStatus,
};
use crate::presentation::http::auth::AuthUser;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::extract::{JsonBody, PathParam, QueryParams, parse_optional};
use crate::presentation::http::pagination::{PageMetaResponse, page_request};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationJobSummary {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub salary: Option<f64>,
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantSummary {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub resume: String,
    pub cover_letter: String,
    pub status: String,
    pub job_id: Uuid,
    pub user_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<ApplicationJobSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<ApplicantSummary>,
}

impl From<Application> for ApplicationResponse {
    fn from(a: Application) -> Self {
        ApplicationResponse {
            id: a.id,
            resume: a.resume,
            cover_letter: a.cover_letter,
            status: a.status.as_str().to_string(),
            job_id: a.job_id,
            user_id: a.user_id,
            created_at: a.created_at,
            updated_at: a.updated_at,
            job: a.job.map(|j| ApplicationJobSummary {
                id: j.id,
                title: j.title,
                location: j.location,
                salary: j.salary,
                status: j.status.as_str().to_string(),
            }),
            user: a.user.map(|u| ApplicantSummary {
                id: u.id,
                full_name: u.full_name,
                email: u.email,
            }),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApplicationListResponse {
    pub data: Vec<ApplicationResponse>,
    pub meta: PageMetaResponse,
}

impl From<Page<Application>> for ApplicationListResponse {
    fn from(p: Page<Application>) -> Self {
        ApplicationListResponse {
            data: p.data.into_iter().map(Into::into).collect(),
            meta: p.meta.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CreateApplicationRequest {
    pub job_id: Option<Uuid>,
    pub resume: String,
    pub cover_letter: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct UpdateApplicationRequest {
    /// `submitted`, `reviewed` or `rejected`
    #[schema(value_type = Option<String>)]
    pub status: Option<ApplicationStatus>,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HasAppliedResponse {
    pub applied: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListApplicationsQuery {
    pub job_id: Option<String>,
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[utoipa::path(post, path = "/applications", tag = "Applications", request_body = CreateApplicationRequest,
    responses(
        (status = 201, body = ApplicationResponse),
        (status = 400, body = ErrorBody),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody),
        (status = 409, body = ErrorBody)
    ))]
pub async fn apply(
    State(ctx): State<AppContext>,
    AuthUser(actor): AuthUser,
    JsonBody(req): JsonBody<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<ApplicationResponse>), ApiError> {
    let job_id = req
        .job_id
        .ok_or_else(|| ApiError::bad_request("jobId should not be empty"))?;
    let jobs = ctx.job_repo();
    let applications = ctx.application_repo();
    let uc = ApplyToJob {
        jobs: jobs.as_ref(),
        applications: applications.as_ref(),
    };
    let input = ApplyInput {
        job_id,
        resume: req.resume,
        cover_letter: req.cover_letter,
    };
    let application = uc.execute(&actor, input).await?;
    Ok((StatusCode::CREATED, Json(application.into())))
}

async fn list_scoped(
    ctx: &AppContext,
    scope: ApplicationScope<'_>,
    q: ListApplicationsQuery,
) -> Result<Json<ApplicationListResponse>, ApiError> {
    let page = page_request(q.page, q.limit)?;
    let query = ApplicationQuery {
        job_id: parse_optional("jobId", q.job_id)?,
        status: parse_optional("status", q.status)?,
    };
    let repo = ctx.application_repo();
    let uc = ListApplications {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(scope, query, page).await?.into()))
}

#[utoipa::path(get, path = "/applications", tag = "Applications",
    params(
        ("jobId" = Option<Uuid>, Query, description = "Only applications to this job"),
        ("status" = Option<String>, Query, description = "submitted | reviewed | rejected"),
        ("page" = Option<i64>, Query, description = "1-based page (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 10)")
    ),
    responses((status = 200, body = ApplicationListResponse), (status = 403, body = ErrorBody)))]
pub async fn list_received(
    State(ctx): State<AppContext>,
    AuthUser(actor): AuthUser,
    QueryParams(q): QueryParams<ListApplicationsQuery>,
) -> Result<Json<ApplicationListResponse>, ApiError> {
    list_scoped(&ctx, ApplicationScope::ReceivedBy(&actor), q).await
}

#[utoipa::path(get, path = "/applications/my", tag = "Applications",
    params(
        ("jobId" = Option<Uuid>, Query, description = "Only applications to this job"),
        ("status" = Option<String>, Query, description = "submitted | reviewed | rejected"),
        ("page" = Option<i64>, Query, description = "1-based page (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 10)")
    ),
    responses((status = 200, body = ApplicationListResponse), (status = 403, body = ErrorBody)))]
pub async fn list_mine(
    State(ctx): State<AppContext>,
    AuthUser(actor): AuthUser,
    QueryParams(q): QueryParams<ListApplicationsQuery>,
) -> Result<Json<ApplicationListResponse>, ApiError> {
    list_scoped(&ctx, ApplicationScope::SubmittedBy(&actor), q).await
}

#[utoipa::path(get, path = "/applications/my/exists/{jobId}", tag = "Applications",
    params(("jobId" = Uuid, Path, description = "Job ID")),
    responses((status = 200, body = HasAppliedResponse), (status = 403, body = ErrorBody)))]
pub async fn has_applied(
    State(ctx): State<AppContext>,
    AuthUser(actor): AuthUser,
    PathParam(job_id): PathParam<Uuid>,
) -> Result<Json<HasAppliedResponse>, ApiError> {
    let repo = ctx.application_repo();
    let uc = HasApplied {
        repo: repo.as_ref(),
    };
    let applied = uc.execute(&actor, job_id).await?;
    Ok(Json(HasAppliedResponse { applied }))
}

#[utoipa::path(get, path = "/applications/job/{jobId}", tag = "Applications",
    params(
        ("jobId" = Uuid, Path, description = "Job ID"),
        ("status" = Option<String>, Query, description = "submitted | reviewed | rejected"),
        ("page" = Option<i64>, Query, description = "1-based page (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 10)")
    ),
    responses(
        (status = 200, body = ApplicationListResponse),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ))]
pub async fn list_for_job(
    State(ctx): State<AppContext>,
    AuthUser(actor): AuthUser,
    PathParam(job_id): PathParam<Uuid>,
    QueryParams(q): QueryParams<ListApplicationsQuery>,
) -> Result<Json<ApplicationListResponse>, ApiError> {
    let page = page_request(q.page, q.limit)?;
    let status = parse_optional("status", q.status)?;
    let jobs = ctx.job_repo();
    let applications = ctx.application_repo();
    let uc = ListJobApplications {
        jobs: jobs.as_ref(),
        applications: applications.as_ref(),
    };
    Ok(Json(uc.execute(&actor, job_id, status, page).await?.into()))
}

#[utoipa::path(get, path = "/applications/{id}", tag = "Applications",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, body = ApplicationResponse),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ))]
pub async fn get_application(
    State(ctx): State<AppContext>,
    AuthUser(actor): AuthUser,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let repo = ctx.application_repo();
    let uc = GetApplication {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(&actor, id).await?.into()))
}

#[utoipa::path(patch, path = "/applications/{id}", tag = "Applications", request_body = UpdateApplicationRequest,
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, body = ApplicationResponse),
        (status = 400, body = ErrorBody),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ))]
pub async fn update_application(
    State(ctx): State<AppContext>,
    AuthUser(actor): AuthUser,
    PathParam(id): PathParam<Uuid>,
    JsonBody(req): JsonBody<UpdateApplicationRequest>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let repo = ctx.application_repo();
    let uc = UpdateApplication {
        repo: repo.as_ref(),
    };
    let changes = ApplicationChanges {
        status: req.status,
        resume: req.resume,
        cover_letter: req.cover_letter,
    };
    Ok(Json(uc.execute(&actor, id, changes).await?.into()))
}

#[utoipa::path(delete, path = "/applications/{id}", tag = "Applications",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, body = ApplicationResponse),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ))]
pub async fn delete_application(
    State(ctx): State<AppContext>,
    AuthUser(actor): AuthUser,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let repo = ctx.application_repo();
    let uc = DeleteApplication {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(&actor, id).await?.into()))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/applications", get(list_received).post(apply))
        .route("/applications/my", get(list_mine))
        .route("/applications/my/exists/:job_id", get(has_applied))
        .route("/applications/job/:job_id", get(list_for_job))
        .route(
            "/applications/:id",
            get(get_application)
                .patch(update_application)
                .delete(delete_application),
        )
        .with_state(ctx)
}
