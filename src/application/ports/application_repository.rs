use async_trait::async_trait;
use uuid::Uuid;

use crate::application::dto::pagination::PageRequest;
use crate::domain::applications::application::{
    Application, ApplicationChanges, ApplicationStatus, NewApplication,
};

/// Optional predicates for application listings. `admin_id` scopes through the
/// job relation (`jobs.created_by`).
#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub admin_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub job_id: Option<Uuid>,
    pub status: Option<ApplicationStatus>,
}

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    // Returns None when (job_id, user_id) already exists
    async fn create(&self, application: &NewApplication) -> anyhow::Result<Option<Application>>;

    async fn exists_for(&self, job_id: Uuid, user_id: Uuid) -> anyhow::Result<bool>;

    async fn list(
        &self,
        filter: &ApplicationFilter,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<Application>, i64)>;

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Application>>;

    async fn update(
        &self,
        id: Uuid,
        changes: &ApplicationChanges,
    ) -> anyhow::Result<Option<Application>>;

    async fn delete(&self, id: Uuid) -> anyhow::Result<Option<Application>>;
}
