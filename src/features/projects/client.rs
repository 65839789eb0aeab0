//! Client helpers for project endpoints. Authorization is enforced by the
//! backend; these helpers only keep the paths in one place.

use crate::{
    app_lib::{AppError, api::ApiClient},
    features::projects::types::{CreateProjectRequest, ProjectSummary},
};

/// Fetches one page of projects.
///
/// # Errors
/// Returns transport errors from [`ApiClient::call`].
pub async fn list_projects(api: &ApiClient, page: u32) -> Result<Vec<ProjectSummary>, AppError> {
    api.get(&format!("/api/projects?page={}", page.max(1))).await
}

/// Creates a project after basic input validation.
///
/// # Errors
/// Returns `AppError::Validation` for a blank name or a backend rejection.
pub async fn create_project(
    api: &ApiClient,
    request: &CreateProjectRequest,
) -> Result<ProjectSummary, AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Project name is required.".to_string()));
    }

    api.post("/api/projects", request).await
}
