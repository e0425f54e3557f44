use std::collections::HashMap;

use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::dto::pagination::{Page, PageRequest};
use crate::application::dto::users::ApplicantDto;
use crate::application::error::ServiceResult;
use crate::application::ports::user_repository::{UserApplication, UserRepository};

pub struct ListApplicants<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> ListApplicants<'a, R> {
    pub async fn execute(&self, actor: &Actor, page: PageRequest) -> ServiceResult<Page<ApplicantDto>> {
        access::require_admin(actor)?;
        let (users, total) = self
            .repo
            .list_applicants_for_admin(actor.user_id, page)
            .await?;
        let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
        let mut by_user: HashMap<Uuid, Vec<UserApplication>> = HashMap::new();
        if !ids.is_empty() {
            for app in self.repo.applications_for_admin(actor.user_id, &ids).await? {
                by_user.entry(app.user_id).or_default().push(app);
            }
        }
        let items = users
            .into_iter()
            .map(|u| {
                let applications = by_user.remove(&u.id).unwrap_or_default();
                ApplicantDto {
                    id: u.id,
                    full_name: u.full_name,
                    email: u.email,
                    role: u.role,
                    created_at: u.created_at,
                    application_count: applications.len() as i64,
                    applications,
                }
            })
            .collect();
        Ok(Page::new(items, total, page))
    }
}
