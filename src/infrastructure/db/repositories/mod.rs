pub mod application_repository_sqlx;
pub mod job_repository_sqlx;
pub mod user_repository_sqlx;
