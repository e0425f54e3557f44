use uuid::Uuid;

use crate::application::access::Actor;
use crate::application::error::ServiceResult;
use crate::application::ports::application_repository::ApplicationRepository;
use crate::application::use_cases::applications::{application_not_found, require_view};
use crate::domain::applications::application::Application;

pub struct GetApplication<'a, R: ApplicationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ApplicationRepository + ?Sized> GetApplication<'a, R> {
    pub async fn execute(&self, actor: &Actor, id: Uuid) -> ServiceResult<Application> {
        let app = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| application_not_found(id))?;
        require_view(actor, &app)?;
        Ok(app)
    }
}
