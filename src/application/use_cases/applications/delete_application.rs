use uuid::Uuid;

use crate::application::access::Actor;
use crate::application::error::ServiceResult;
use crate::application::ports::application_repository::ApplicationRepository;
use crate::application::use_cases::applications::{application_not_found, require_manage};
use crate::domain::applications::application::Application;

pub struct DeleteApplication<'a, R: ApplicationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ApplicationRepository + ?Sized> DeleteApplication<'a, R> {
    pub async fn execute(&self, actor: &Actor, id: Uuid) -> ServiceResult<Application> {
        let existing = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| application_not_found(id))?;
        require_manage(actor, &existing)?;
        let deleted = self
            .repo
            .delete(id)
            .await?
            .ok_or_else(|| application_not_found(id))?;
        tracing::info!(application_id = %id, "application_deleted");
        Ok(deleted)
    }
}
