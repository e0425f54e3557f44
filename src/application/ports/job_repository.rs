use async_trait::async_trait;
use uuid::Uuid;

use crate::application::dto::pagination::PageRequest;
use crate::domain::jobs::job::{Job, JobChanges, JobStatus, NewJob};

/// Optional predicates for job listings. `owner_id` is the admin scope and,
/// when set, is always part of the query predicate.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub owner_id: Option<Uuid>,
    pub search: Option<String>,
    pub location: Option<String>,
    pub status: Option<JobStatus>,
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, created_by: Uuid, job: &NewJob) -> anyhow::Result<Job>;

    async fn list(&self, filter: &JobFilter, page: PageRequest)
    -> anyhow::Result<(Vec<Job>, i64)>;

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Job>>;

    async fn update(&self, id: Uuid, changes: &JobChanges) -> anyhow::Result<Option<Job>>;

    // Applications go with the job (ON DELETE CASCADE)
    async fn delete(&self, id: Uuid) -> anyhow::Result<Option<Job>>;

    async fn distinct_locations(&self) -> anyhow::Result<Vec<String>>;
}
