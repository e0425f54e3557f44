use async_trait::async_trait;
use uuid::Uuid;

use crate::application::dto::pagination::PageRequest;
use crate::domain::applications::application::ApplicationStatus;
use crate::domain::users::user::{Role, User};

#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// One application as seen from the applicant's profile.
#[derive(Debug, Clone)]
pub struct UserApplication {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: ApplicationStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub job_id: Uuid,
    pub job_title: String,
    pub job_location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdminStats {
    pub total_jobs: i64,
    pub total_applications: i64,
    pub total_applicants: i64,
    pub open_jobs: i64,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    // Returns None when the email is already registered
    async fn create_user(&self, user: &NewUser) -> anyhow::Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserCredentials>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;

    /// Jobseekers with at least one application to a job created by `admin_id`,
    /// newest first, plus the unpaged total.
    async fn list_applicants_for_admin(
        &self,
        admin_id: Uuid,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<User>, i64)>;

    /// Applications of `user_ids` restricted to jobs created by `admin_id`, newest first.
    async fn applications_for_admin(
        &self,
        admin_id: Uuid,
        user_ids: &[Uuid],
    ) -> anyhow::Result<Vec<UserApplication>>;

    async fn count_applications(&self, user_id: Uuid) -> anyhow::Result<i64>;

    async fn stats_for_admin(&self, admin_id: Uuid) -> anyhow::Result<AdminStats>;
}
