use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::dto::users::UserDetailDto;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::UserRepository;

pub struct GetUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> GetUser<'a, R> {
    pub async fn execute(&self, actor: &Actor, id: Uuid) -> ServiceResult<UserDetailDto> {
        access::require_admin(actor)?;
        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("User with ID {id} not found")))?;
        let applications = self.repo.applications_for_admin(actor.user_id, &[id]).await?;
        let application_count = self.repo.count_applications(id).await?;
        Ok(UserDetailDto {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            applications,
            application_count,
        })
    }
}
