use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::user::User;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub project_slug: String,
    pub user_id: Uuid,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Submission payload. There is deliberately no `approved` field here: the
/// moderation state is not caller-controlled.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCommentRequest {
    #[validate(length(min = 1, message = "Project slug is required"))]
    pub project_slug: String,

    #[validate(length(min = 1, max = 1000, message = "Content must be 1-1000 characters"))]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentInsert {
    pub user_id: Uuid,
    pub project_slug: String,
    pub content: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

impl CommentInsert {
    /// Every comment enters the store unapproved; publication is a manual
    /// moderation action outside this system.
    pub fn new(user_id: Uuid, project_slug: String, content: String) -> Self {
        CommentInsert {
            user_id,
            project_slug,
            content,
            approved: false,
            created_at: Utc::now(),
        }
    }
}

/// A comment row joined with its author's name and email.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRecord {
    pub id: Uuid,
    pub content: String,
    pub project_slug: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub user_email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub project_slug: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
    pub user: CommentAuthor,
}

impl From<CommentRecord> for CommentResponse {
    fn from(record: CommentRecord) -> Self {
        CommentResponse {
            id: record.id,
            content: record.content,
            project_slug: record.project_slug,
            approved: record.approved,
            created_at: record.created_at,
            user: CommentAuthor {
                name: record.user_name,
                email: record.user_email,
            },
        }
    }
}

impl CommentResponse {
    pub fn from_parts(comment: Comment, author: &User) -> Self {
        CommentResponse {
            id: comment.id,
            content: comment.content,
            project_slug: comment.project_slug,
            approved: comment.approved,
            created_at: comment.created_at,
            user: CommentAuthor {
                name: author.name.clone(),
                email: author.email.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_oversized_content() {
        let mut request = NewCommentRequest {
            project_slug: "shop".to_string(),
            content: String::new(),
        };
        assert!(request.validate().is_err());

        request.content = "c".repeat(1001);
        assert!(request.validate().is_err());

        request.content = "c".repeat(1000);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn rejects_missing_project_slug() {
        let request = NewCommentRequest {
            project_slug: String::new(),
            content: "Nice work".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn payload_cannot_set_approved() {
        // An `approved` key in the body is silently dropped on deserialization.
        let request: NewCommentRequest = serde_json::from_value(serde_json::json!({
            "projectSlug": "shop",
            "content": "First!",
            "approved": true,
        }))
        .unwrap();
        assert_eq!(request.project_slug, "shop");

        let insert = CommentInsert::new(Uuid::new_v4(), request.project_slug, request.content);
        assert!(!insert.approved);
    }
}
