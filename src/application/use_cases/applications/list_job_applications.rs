use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::dto::pagination::{Page, PageRequest};
use crate::application::error::ServiceResult;
use crate::application::ports::application_repository::{
    ApplicationFilter, ApplicationRepository,
};
use crate::application::ports::job_repository::JobRepository;
use crate::application::use_cases::jobs::get_job::job_not_found;
use crate::domain::applications::application::{Application, ApplicationStatus};

pub struct ListJobApplications<'a, J, A>
where
    J: JobRepository + ?Sized,
    A: ApplicationRepository + ?Sized,
{
    pub jobs: &'a J,
    pub applications: &'a A,
}

impl<'a, J, A> ListJobApplications<'a, J, A>
where
    J: JobRepository + ?Sized,
    A: ApplicationRepository + ?Sized,
{
    pub async fn execute(
        &self,
        actor: &Actor,
        job_id: Uuid,
        status: Option<ApplicationStatus>,
        page: PageRequest,
    ) -> ServiceResult<Page<Application>> {
        access::require_admin(actor)?;
        let job = self
            .jobs
            .get_by_id(job_id)
            .await?
            .ok_or_else(|| job_not_found(job_id))?;
        access::require_job_owner(actor, &job)?;

        let filter = ApplicationFilter {
            admin_id: Some(actor.user_id),
            job_id: Some(job_id),
            status,
            ..Default::default()
        };
        let (items, total) = self.applications.list(&filter, page).await?;
        Ok(Page::new(items, total, page))
    }
}
