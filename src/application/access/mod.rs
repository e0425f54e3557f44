use uuid::Uuid;

use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::jobs::job::Job;
use crate::domain::users::user::Role;

/// Authenticated caller. The presentation layer builds this from token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }
}

pub fn require_role(actor: &Actor, role: Role) -> ServiceResult<()> {
    if actor.role == role {
        Ok(())
    } else {
        Err(ServiceError::forbidden(format!(
            "This action requires the {role} role"
        )))
    }
}

pub fn require_admin(actor: &Actor) -> ServiceResult<()> {
    require_role(actor, Role::Admin)
}

pub fn require_jobseeker(actor: &Actor) -> ServiceResult<()> {
    require_role(actor, Role::Jobseeker)
}

/// Admins may only manage jobs they created.
pub fn require_job_owner(actor: &Actor, job: &Job) -> ServiceResult<()> {
    require_admin(actor)?;
    if job.created_by == actor.user_id {
        Ok(())
    } else {
        Err(ServiceError::forbidden("You do not own this job"))
    }
}
