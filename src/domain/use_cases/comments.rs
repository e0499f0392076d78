use validator::Validate;

use crate::{
    entities::comment::{CommentInsert, CommentResponse, NewCommentRequest},
    entities::session::SessionIdentity,
    errors::AppError,
    repositories::{comment::CommentRepository, project::ProjectRepository, user::UserRepository},
};

pub struct CommentHandler<U, P, C>
where
    U: UserRepository,
    P: ProjectRepository,
    C: CommentRepository,
{
    pub user_repo: U,
    pub project_repo: P,
    pub comment_repo: C,
}

impl<U, P, C> CommentHandler<U, P, C>
where
    U: UserRepository,
    P: ProjectRepository,
    C: CommentRepository,
{
    pub fn new(user_repo: U, project_repo: P, comment_repo: C) -> Self {
        CommentHandler {
            user_repo,
            project_repo,
            comment_repo,
        }
    }

    /// Persists a new comment for the authenticated caller. Validation runs
    /// before any store access; the row always enters unapproved.
    pub async fn create_comment(
        &self,
        session: &SessionIdentity,
        request: NewCommentRequest,
    ) -> Result<CommentResponse, AppError> {
        request.validate()?;

        // Defensive: profile save creates the User row, but a comment can
        // arrive from a session that never saved one.
        let user = self
            .user_repo
            .find_by_clerk_id(&session.clerk_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let project = self
            .project_repo
            .find_by_slug(&request.project_slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        let insert = CommentInsert::new(user.id, project.slug, request.content);
        let comment = self.comment_repo.create_comment(&insert).await?;

        Ok(CommentResponse::from_parts(comment, &user))
    }

    /// Comments for a project, newest first. `approved_only` narrows to
    /// moderated rows; otherwise every row is returned and display-time trust
    /// is the caller's concern.
    pub async fn list_comments(
        &self,
        project_slug: &str,
        approved_only: bool,
    ) -> Result<Vec<CommentResponse>, AppError> {
        let records = self
            .comment_repo
            .list_for_project(project_slug, approved_only)
            .await?;

        Ok(records.into_iter().map(CommentResponse::from).collect())
    }
}
