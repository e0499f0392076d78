use crate::{
    entities::project::{Project, ProjectBrowseResponse, ProjectDetailResponse},
    errors::AppError,
    filter::{category_counts, FilterSelection},
    repositories::project::ProjectRepository,
    utils::markdown::safe_markdown_to_html,
};

pub struct ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R) -> Self {
        ProjectHandler { project_repo }
    }

    /// Fetches the full catalogue once and derives the filtered view, the
    /// per-category count map, and the canonical query string from it.
    pub async fn browse(&self, selection: FilterSelection) -> Result<ProjectBrowseResponse, AppError> {
        let projects = self.project_repo.list_projects().await?;

        let counts = category_counts(&projects);
        let query_string = selection.to_query_string();
        let filtered = selection
            .apply(&projects)
            .into_iter()
            .cloned()
            .collect();

        Ok(ProjectBrowseResponse {
            projects: filtered,
            counts,
            query_string,
        })
    }

    /// Featured projects for the home page strip.
    pub async fn featured(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_featured().await
    }

    /// Project detail with the long-form content rendered to sanitized HTML.
    pub async fn get_by_slug(&self, slug: &str) -> Result<ProjectDetailResponse, AppError> {
        let project = self
            .project_repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        let content_html = safe_markdown_to_html(&project.content);

        Ok(ProjectDetailResponse { project, content_html })
    }
}
