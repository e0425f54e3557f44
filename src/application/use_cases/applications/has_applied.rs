use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::error::ServiceResult;
use crate::application::ports::application_repository::ApplicationRepository;

pub struct HasApplied<'a, R: ApplicationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ApplicationRepository + ?Sized> HasApplied<'a, R> {
    pub async fn execute(&self, actor: &Actor, job_id: Uuid) -> ServiceResult<bool> {
        access::require_jobseeker(actor)?;
        Ok(self.repo.exists_for(job_id, actor.user_id).await?)
    }
}
