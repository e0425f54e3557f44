use crate::application::access::{self, Actor};
use crate::application::error::ServiceResult;
use crate::application::ports::job_repository::JobRepository;
use crate::application::validation;
use crate::domain::jobs::job::{Job, JobStatus, NewJob};

pub struct CreateJob<'a, R: JobRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone, Default)]
pub struct CreateJobInput {
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: Option<f64>,
    pub status: Option<JobStatus>,
}

impl<'a, R: JobRepository + ?Sized> CreateJob<'a, R> {
    pub async fn execute(&self, actor: &Actor, input: CreateJobInput) -> ServiceResult<Job> {
        access::require_admin(actor)?;
        let new_job = NewJob {
            title: validation::non_empty("title", &input.title)?,
            description: validation::non_empty("description", &input.description)?,
            location: validation::non_empty("location", &input.location)?,
            salary: validation::salary(input.salary)?,
            status: input.status.unwrap_or_default(),
        };
        let job = self.repo.create(actor.user_id, &new_job).await?;
        tracing::info!(job_id = %job.id, admin_id = %actor.user_id, "job_created");
        Ok(job)
    }
}
