use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::error::ServiceResult;
use crate::application::ports::job_repository::JobRepository;
use crate::application::use_cases::jobs::get_job::job_not_found;
use crate::domain::jobs::job::Job;

pub struct DeleteJob<'a, R: JobRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: JobRepository + ?Sized> DeleteJob<'a, R> {
    pub async fn execute(&self, actor: &Actor, id: Uuid) -> ServiceResult<Job> {
        access::require_admin(actor)?;
        let existing = self.repo.get_by_id(id).await?.ok_or_else(|| job_not_found(id))?;
        access::require_job_owner(actor, &existing)?;
        let deleted = self.repo.delete(id).await?.ok_or_else(|| job_not_found(id))?;
        tracing::info!(job_id = %id, admin_id = %actor.user_id, "job_deleted");
        Ok(deleted)
    }
}
