use uuid::Uuid;

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::job_repository::JobRepository;
use crate::domain::jobs::job::Job;

pub struct GetJob<'a, R: JobRepository + ?Sized> {
    pub repo: &'a R,
}

pub(crate) fn job_not_found(id: Uuid) -> ServiceError {
    ServiceError::not_found(format!("Job with ID {id} not found"))
}

impl<'a, R: JobRepository + ?Sized> GetJob<'a, R> {
    pub async fn execute(&self, id: Uuid) -> ServiceResult<Job> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| job_not_found(id))
    }
}
