use async_trait::async_trait;
use std::borrow::Cow;

use crate::{
    entities::comment::{Comment, CommentInsert, CommentRecord},
    errors::AppError,
    repositories::sqlx_repo::SqlxCommentRepo,
};

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create_comment(&self, insert: &CommentInsert) -> Result<Comment, AppError>;
    async fn list_for_project(
        &self,
        project_slug: &str,
        approved_only: bool,
    ) -> Result<Vec<CommentRecord>, AppError>;
}

impl SqlxCommentRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxCommentRepo { pool }
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepo {
    async fn create_comment(&self, insert: &CommentInsert) -> Result<Comment, AppError> {
        sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (content, project_slug, user_id, approved, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&insert.content)
        .bind(&insert.project_slug)
        .bind(insert.user_id)
        .bind(insert.approved)
        .bind(insert.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23503")) => {
                // The referenced project or user vanished between lookup and insert.
                AppError::NotFound("Referenced project or user no longer exists".to_string())
            }
            _ => AppError::from(e),
        })
    }

    async fn list_for_project(
        &self,
        project_slug: &str,
        approved_only: bool,
    ) -> Result<Vec<CommentRecord>, AppError> {
        sqlx::query_as::<_, CommentRecord>(
            r#"
            SELECT c.id, c.content, c.project_slug, c.approved, c.created_at,
                   u.name AS user_name, u.email AS user_email
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.project_slug = $1
              AND ($2 = FALSE OR c.approved = TRUE)
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(project_slug)
        .bind(approved_only)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }
}
