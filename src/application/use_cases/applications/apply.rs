use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::application_repository::ApplicationRepository;
use crate::application::ports::job_repository::JobRepository;
use crate::application::use_cases::jobs::get_job::job_not_found;
use crate::application::validation;
use crate::domain::applications::application::{Application, NewApplication};

pub struct ApplyToJob<'a, J, A>
where
    J: JobRepository + ?Sized,
    A: ApplicationRepository + ?Sized,
{
    pub jobs: &'a J,
    pub applications: &'a A,
}

#[derive(Debug, Clone)]
pub struct ApplyInput {
    pub job_id: Uuid,
    pub resume: String,
    pub cover_letter: String,
}

const ALREADY_APPLIED: &str = "You have already applied for this job";

impl<'a, J, A> ApplyToJob<'a, J, A>
where
    J: JobRepository + ?Sized,
    A: ApplicationRepository + ?Sized,
{
    pub async fn execute(&self, actor: &Actor, input: ApplyInput) -> ServiceResult<Application> {
        access::require_jobseeker(actor)?;
        let resume = validation::non_empty("resume", &input.resume)?;
        let cover_letter = validation::non_empty("coverLetter", &input.cover_letter)?;

        let job = self
            .jobs
            .get_by_id(input.job_id)
            .await?
            .ok_or_else(|| job_not_found(input.job_id))?;
        if !job.status.accepts_applications() {
            return Err(ServiceError::forbidden(
                "This job is no longer accepting applications",
            ));
        }

        if self.applications.exists_for(job.id, actor.user_id).await? {
            return Err(ServiceError::conflict(ALREADY_APPLIED));
        }

        let new_application = NewApplication {
            job_id: job.id,
            user_id: actor.user_id,
            resume,
            cover_letter,
        };
        // The unique (job_id, user_id) index settles concurrent duplicates
        let Some(application) = self.applications.create(&new_application).await? else {
            tracing::info!(job_id = %job.id, user_id = %actor.user_id, "duplicate_application_rejected");
            return Err(ServiceError::conflict(ALREADY_APPLIED));
        };
        tracing::info!(application_id = %application.id, job_id = %job.id, user_id = %actor.user_id, "application_submitted");
        Ok(application)
    }
}
