use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::error::ServiceResult;
use crate::application::ports::job_repository::JobRepository;
use crate::application::use_cases::jobs::get_job::job_not_found;
use crate::application::validation;
use crate::domain::jobs::job::{Job, JobChanges};

pub struct UpdateJob<'a, R: JobRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: JobRepository + ?Sized> UpdateJob<'a, R> {
    pub async fn execute(&self, actor: &Actor, id: Uuid, changes: JobChanges) -> ServiceResult<Job> {
        access::require_admin(actor)?;
        let existing = self.repo.get_by_id(id).await?.ok_or_else(|| job_not_found(id))?;
        access::require_job_owner(actor, &existing)?;

        let changes = JobChanges {
            title: validation::optional_non_empty("title", changes.title.as_deref())?,
            description: validation::optional_non_empty(
                "description",
                changes.description.as_deref(),
            )?,
            location: validation::optional_non_empty("location", changes.location.as_deref())?,
            salary: match changes.salary {
                Some(v) => Some(validation::salary(v)?),
                None => None,
            },
            status: changes.status,
        };
        if changes.is_empty() {
            return Ok(existing);
        }
        let job = self
            .repo
            .update(id, &changes)
            .await?
            .ok_or_else(|| job_not_found(id))?;
        tracing::info!(job_id = %id, status = %job.status, "job_updated");
        Ok(job)
    }
}
