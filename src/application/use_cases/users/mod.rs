pub mod get_stats;
pub mod get_user;
pub mod list_applicants;
