use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// A portfolio project. Rows are seeded by an external process and are
/// read-only to this application.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub image_url: Option<String>,
    pub technologies: Vec<String>,
    pub primary_category: String,
    pub sub_category: String,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetailResponse {
    #[serde(flatten)]
    pub project: Project,
    /// Long-form `content` rendered to sanitized HTML.
    pub content_html: String,
}

/// The browse payload: the filtered list, the per-primary count map, and the
/// canonical query string the client mirrors into the address bar.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBrowseResponse {
    pub projects: Vec<Project>,
    pub counts: BTreeMap<String, usize>,
    pub query_string: String,
}
