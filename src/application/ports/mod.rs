pub mod application_repository;
pub mod job_repository;
pub mod user_repository;
