use crate::application::access::{self, Actor};
use crate::application::error::ServiceResult;
use crate::application::ports::user_repository::{AdminStats, UserRepository};

pub struct GetAdminStats<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> GetAdminStats<'a, R> {
    pub async fn execute(&self, actor: &Actor) -> ServiceResult<AdminStats> {
        access::require_admin(actor)?;
        Ok(self.repo.stats_for_admin(actor.user_id).await?)
    }
}
