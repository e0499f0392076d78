pub mod comment;
pub mod identity;
pub mod profile;
pub mod project;
pub mod sqlx_repo;
pub mod user;
