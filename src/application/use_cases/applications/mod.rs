pub mod apply;
pub mod delete_application;
pub mod get_application;
pub mod has_applied;
pub mod list_applications;
pub mod list_job_applications;
pub mod update_application;

use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::applications::application::Application;
use crate::domain::users::user::Role;

pub(crate) fn application_not_found(id: Uuid) -> ServiceError {
    ServiceError::not_found(format!("Application with ID {id} not found"))
}

fn owned_by_admin(actor: &Actor, app: &Application) -> bool {
    app.job
        .as_ref()
        .map(|j| j.created_by == actor.user_id)
        .unwrap_or(false)
}

/// Applicants see their own applications, admins see the ones sent to their jobs.
pub(crate) fn require_view(actor: &Actor, app: &Application) -> ServiceResult<()> {
    let allowed = match actor.role {
        Role::Jobseeker => app.user_id == actor.user_id,
        Role::Admin => owned_by_admin(actor, app),
    };
    if allowed {
        Ok(())
    } else {
        Err(ServiceError::forbidden("You cannot access this application"))
    }
}

pub(crate) fn require_manage(actor: &Actor, app: &Application) -> ServiceResult<()> {
    access::require_admin(actor)?;
    if owned_by_admin(actor, app) {
        Ok(())
    } else {
        Err(ServiceError::forbidden("You do not own the job for this application"))
    }
}
