use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    categories::PrimaryCategory,
    errors::{AppError, FieldError},
    filter::FilterSelection,
    AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseQuery {
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub search: Option<String>,
}

/// Builds the typed selection from raw query parameters. An unknown category
/// value is a field-level validation error on this surface.
fn selection_from_query(query: BrowseQuery) -> Result<FilterSelection, AppError> {
    let mut selection = FilterSelection::default();

    if let Some(raw) = query.category.as_deref() {
        let primary = raw.parse::<PrimaryCategory>().map_err(|e| {
            AppError::ValidationError(vec![FieldError {
                field: "category".to_string(),
                message: e.to_string(),
            }])
        })?;
        selection.select_primary(primary);
    }
    if let Some(sub_category) = query.sub_category {
        selection.select_sub_category(sub_category);
    }
    if let Some(search) = query.search {
        selection.set_query(search);
    }

    Ok(selection)
}

#[instrument(skip(state, query))]
pub async fn browse_projects(
    state: web::Data<AppState>,
    query: web::Query<BrowseQuery>,
) -> Result<impl Responder, AppError> {
    let selection = selection_from_query(query.into_inner())?;
    let response = state.project_handler.browse(selection).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(state))]
pub async fn featured_projects(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.featured().await?;

    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state, slug))]
pub async fn get_project(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.get_by_slug(&slug).await?;

    Ok(HttpResponse::Ok().json(project))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(category: Option<&str>, sub: Option<&str>, search: Option<&str>) -> BrowseQuery {
        BrowseQuery {
            category: category.map(String::from),
            sub_category: sub.map(String::from),
            search: search.map(String::from),
        }
    }

    #[test]
    fn absent_parameters_mean_defaults() {
        let selection = selection_from_query(query(None, None, None)).unwrap();
        assert!(selection.is_default());
    }

    #[test]
    fn explicit_sub_category_survives_primary_selection() {
        let selection =
            selection_from_query(query(Some("Bots"), Some("Utility Bot"), None)).unwrap();
        assert_eq!(selection.primary, PrimaryCategory::Bots);
        assert_eq!(selection.sub_category, "Utility Bot");
    }

    #[test]
    fn unknown_category_is_a_field_error() {
        let err = selection_from_query(query(Some("Desktop"), None, None)).unwrap_err();
        match err {
            AppError::ValidationError(fields) => {
                assert_eq!(fields[0].field, "category");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
