use uuid::Uuid;

use crate::application::access::Actor;
use crate::application::error::ServiceResult;
use crate::application::ports::application_repository::ApplicationRepository;
use crate::application::use_cases::applications::{application_not_found, require_manage};
use crate::application::validation;
use crate::domain::applications::application::{Application, ApplicationChanges};

pub struct UpdateApplication<'a, R: ApplicationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ApplicationRepository + ?Sized> UpdateApplication<'a, R> {
    pub async fn execute(
        &self,
        actor: &Actor,
        id: Uuid,
        changes: ApplicationChanges,
    ) -> ServiceResult<Application> {
        let existing = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| application_not_found(id))?;
        require_manage(actor, &existing)?;

        let changes = ApplicationChanges {
            status: changes.status,
            resume: validation::optional_non_empty("resume", changes.resume.as_deref())?,
            cover_letter: validation::optional_non_empty(
                "coverLetter",
                changes.cover_letter.as_deref(),
            )?,
        };
        if changes.is_empty() {
            return Ok(existing);
        }
        let updated = self
            .repo
            .update(id, &changes)
            .await?
            .ok_or_else(|| application_not_found(id))?;
        tracing::info!(application_id = %id, status = %updated.status, "application_updated");
        Ok(updated)
    }
}
