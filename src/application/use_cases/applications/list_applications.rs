use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::dto::pagination::{Page, PageRequest};
use crate::application::error::ServiceResult;
use crate::application::ports::application_repository::{
    ApplicationFilter, ApplicationRepository,
};
use crate::domain::applications::application::{Application, ApplicationStatus};

pub struct ListApplications<'a, R: ApplicationRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone, Default)]
pub struct ApplicationQuery {
    pub job_id: Option<Uuid>,
    pub status: Option<ApplicationStatus>,
}

#[derive(Debug, Clone, Copy)]
pub enum ApplicationScope<'a> {
    /// Applications to jobs the admin created.
    ReceivedBy(&'a Actor),
    /// Applications the jobseeker submitted.
    SubmittedBy(&'a Actor),
}

impl<'a, R: ApplicationRepository + ?Sized> ListApplications<'a, R> {
    pub async fn execute(
        &self,
        scope: ApplicationScope<'_>,
        query: ApplicationQuery,
        page: PageRequest,
    ) -> ServiceResult<Page<Application>> {
        let mut filter = ApplicationFilter {
            job_id: query.job_id,
            status: query.status,
            ..Default::default()
        };
        match scope {
            ApplicationScope::ReceivedBy(actor) => {
                access::require_admin(actor)?;
                filter.admin_id = Some(actor.user_id);
            }
            ApplicationScope::SubmittedBy(actor) => {
                access::require_jobseeker(actor)?;
                filter.user_id = Some(actor.user_id);
            }
        }
        let (items, total) = self.repo.list(&filter, page).await?;
        Ok(Page::new(items, total, page))
    }
}
