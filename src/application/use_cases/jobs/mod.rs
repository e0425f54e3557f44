pub mod create_job;
pub mod delete_job;
pub mod get_job;
pub mod list_jobs;
pub mod list_locations;
pub mod update_job;
