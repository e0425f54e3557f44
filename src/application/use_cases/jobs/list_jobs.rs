use crate::application::access::{self, Actor};
use crate::application::dto::pagination::{Page, PageRequest};
use crate::application::error::ServiceResult;
use crate::application::ports::job_repository::{JobFilter, JobRepository};
use crate::domain::jobs::job::{Job, JobStatus};

pub struct ListJobs<'a, R: JobRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone, Default)]
pub struct JobQuery {
    pub search: Option<String>,
    pub location: Option<String>,
    pub status: Option<JobStatus>,
}

/// Which slice of the job board a listing covers.
#[derive(Debug, Clone, Copy)]
pub enum JobScope<'a> {
    All,
    Open,
    OwnedBy(&'a Actor),
}

impl<'a, R: JobRepository + ?Sized> ListJobs<'a, R> {
    pub async fn execute(
        &self,
        scope: JobScope<'_>,
        query: JobQuery,
        page: PageRequest,
    ) -> ServiceResult<Page<Job>> {
        let mut filter = JobFilter {
            owner_id: None,
            search: query.search.filter(|s| !s.trim().is_empty()),
            location: query.location.filter(|s| !s.trim().is_empty()),
            status: query.status,
        };
        match scope {
            JobScope::All => {}
            JobScope::Open => filter.status = Some(JobStatus::Open),
            JobScope::OwnedBy(actor) => {
                access::require_admin(actor)?;
                filter.owner_id = Some(actor.user_id);
            }
        }
        let (items, total) = self.repo.list(&filter, page).await?;
        Ok(Page::new(items, total, page))
    }
}
