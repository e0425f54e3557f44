use uuid::Uuid;

use crate::application::ports::user_repository::UserApplication;
use crate::domain::users::user::Role;

/// A jobseeker together with the applications they sent to one admin's jobs.
#[derive(Debug, Clone)]
pub struct ApplicantDto {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub applications: Vec<UserApplication>,
    pub application_count: i64,
}

/// `applications` is scoped to the viewing admin; `application_count` is not.
#[derive(Debug, Clone)]
pub struct UserDetailDto {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub applications: Vec<UserApplication>,
    pub application_count: i64,
}
