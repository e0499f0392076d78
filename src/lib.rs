mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{categories, entities, filter, use_cases};
pub use interfaces::{handlers, middlewares, repositories, routes};
pub use infrastructure::{auth, db, utils};

use auth::clerk::ClerkClient;
use errors::AuthError;
use repositories::sqlx_repo::{SqlxCommentRepo, SqlxProfileRepo, SqlxProjectRepo, SqlxUserRepo};
use use_cases::{comments::CommentHandler, profile::ProfileHandler, projects::ProjectHandler};

pub struct AppState {
    pub project_handler: AppProjectHandler,
    pub comment_handler: AppCommentHandler,
    pub profile_handler: AppProfileHandler,
    pub identity: ClerkClient,
}

pub type AppProjectHandler = ProjectHandler<SqlxProjectRepo>;
pub type AppCommentHandler = CommentHandler<SqlxUserRepo, SqlxProjectRepo, SqlxCommentRepo>;
pub type AppProfileHandler = ProfileHandler<SqlxProfileRepo, ClerkClient>;

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Result<Self, AuthError> {
        let identity = ClerkClient::new(config)?;

        let project_handler = ProjectHandler::new(SqlxProjectRepo::new(pool.clone()));
        let comment_handler = CommentHandler::new(
            SqlxUserRepo::new(pool.clone()),
            SqlxProjectRepo::new(pool.clone()),
            SqlxCommentRepo::new(pool.clone()),
        );
        let profile_handler = ProfileHandler::new(SqlxProfileRepo::new(pool), identity.clone());

        Ok(AppState {
            project_handler,
            comment_handler,
            profile_handler,
            identity,
        })
    }
}
