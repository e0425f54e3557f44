pub mod pagination;
pub mod users;
