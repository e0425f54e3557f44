use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::pagination::Page;
use crate::application::dto::users::{ApplicantDto, UserDetailDto};
use crate::application::ports::user_repository::{AdminStats, UserApplication};
use crate::application::use_cases::users::get_stats::GetAdminStats;
use crate::application::use_cases::users::get_user::GetUser;
use crate::application::use_cases::users::list_applicants::ListApplicants;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::AuthUser;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::extract::{PathParam, QueryParams};
use crate::presentation::http::pagination::{PageMetaResponse, page_request};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserJobRef {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserApplicationItem {
    pub id: Uuid,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub job: UserJobRef,
}

impl UserApplicationItem {
    fn from_app(a: UserApplication, with_location: bool) -> Self {
        UserApplicationItem {
            id: a.id,
            status: a.status.as_str().to_string(),
            created_at: a.created_at,
            job: UserJobRef {
                id: a.job_id,
                title: a.job_title,
                location: with_location.then_some(a.job_location),
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub applications: Vec<UserApplicationItem>,
    pub application_count: i64,
}

impl From<ApplicantDto> for ApplicantResponse {
    fn from(u: ApplicantDto) -> Self {
        ApplicantResponse {
            id: u.id,
            full_name: u.full_name,
            email: u.email,
            role: u.role.as_str().to_string(),
            created_at: u.created_at,
            applications: u
                .applications
                .into_iter()
                .map(|a| UserApplicationItem::from_app(a, false))
                .collect(),
            application_count: u.application_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApplicantListResponse {
    pub data: Vec<ApplicantResponse>,
    pub meta: PageMetaResponse,
}

impl From<Page<ApplicantDto>> for ApplicantListResponse {
    fn from(p: Page<ApplicantDto>) -> Self {
        ApplicantListResponse {
            data: p.data.into_iter().map(Into::into).collect(),
            meta: p.meta.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub applications: Vec<UserApplicationItem>,
    pub application_count: i64,
}

impl From<UserDetailDto> for UserDetailResponse {
    fn from(u: UserDetailDto) -> Self {
        UserDetailResponse {
            id: u.id,
            full_name: u.full_name,
            email: u.email,
            role: u.role.as_str().to_string(),
            created_at: u.created_at,
            applications: u
                .applications
                .into_iter()
                .map(|a| UserApplicationItem::from_app(a, true))
                .collect(),
            application_count: u.application_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_jobs: i64,
    pub total_applications: i64,
    pub total_applicants: i64,
    pub open_jobs: i64,
}

impl From<AdminStats> for StatsResponse {
    fn from(s: AdminStats) -> Self {
        StatsResponse {
            total_jobs: s.total_jobs,
            total_applications: s.total_applications,
            total_applicants: s.total_applicants,
            open_jobs: s.open_jobs,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListApplicantsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[utoipa::path(get, path = "/users", tag = "Users",
    params(
        ("page" = Option<i64>, Query, description = "1-based page (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 10)")
    ),
    responses((status = 200, body = ApplicantListResponse), (status = 403, body = ErrorBody)))]
pub async fn list_applicants(
    State(ctx): State<AppContext>,
    AuthUser(actor): AuthUser,
    QueryParams(q): QueryParams<ListApplicantsQuery>,
) -> Result<Json<ApplicantListResponse>, ApiError> {
    let page = page_request(q.page, q.limit)?;
    let repo = ctx.user_repo();
    let uc = ListApplicants {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(&actor, page).await?.into()))
}

#[utoipa::path(get, path = "/users/stats", tag = "Users",
    responses((status = 200, body = StatsResponse), (status = 403, body = ErrorBody)))]
pub async fn stats(
    State(ctx): State<AppContext>,
    AuthUser(actor): AuthUser,
) -> Result<Json<StatsResponse>, ApiError> {
    let repo = ctx.user_repo();
    let uc = GetAdminStats {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(&actor).await?.into()))
}

#[utoipa::path(get, path = "/users/{id}", tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, body = UserDetailResponse),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ))]
pub async fn get_user(
    State(ctx): State<AppContext>,
    AuthUser(actor): AuthUser,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<UserDetailResponse>, ApiError> {
    let repo = ctx.user_repo();
    let uc = GetUser {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(&actor, id).await?.into()))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/users", get(list_applicants))
        .route("/users/stats", get(stats))
        .route("/users/:id", get(get_user))
        .with_state(ctx)
}
