use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    entities::comment::NewCommentRequest,
    errors::{AppError, FieldError},
    use_cases::extractors::AuthSession,
    AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsQuery {
    pub project_slug: Option<String>,
    pub approved: Option<String>,
}

#[instrument(skip(state, query))]
pub async fn list_comments(
    state: web::Data<AppState>,
    query: web::Query<CommentsQuery>,
) -> Result<impl Responder, AppError> {
    let query = query.into_inner();

    let project_slug = query
        .project_slug
        .filter(|slug| !slug.is_empty())
        .ok_or_else(|| {
            AppError::ValidationError(vec![FieldError {
                field: "projectSlug".to_string(),
                message: "Project slug is required".to_string(),
            }])
        })?;

    // Only the literal "true" narrows to approved rows.
    let approved_only = query.approved.as_deref() == Some("true");

    let comments = state
        .comment_handler
        .list_comments(&project_slug, approved_only)
        .await?;

    Ok(HttpResponse::Ok().json(comments))
}

#[instrument(skip(session, state, data))]
pub async fn create_comment(
    session: AuthSession,
    state: web::Data<AppState>,
    data: web::Json<NewCommentRequest>,
) -> Result<impl Responder, AppError> {
    let comment = state
        .comment_handler
        .create_comment(&session.0, data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(comment))
}
