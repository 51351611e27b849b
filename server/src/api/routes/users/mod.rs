//! User analytics API endpoints
//!
//! Mounted under `/api/v1/project/{project_id}/users`. Callers are expected
//! to be authorized for the project already.

pub mod types;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::api::types::ApiError;
use crate::domain::UserAnalyticsService;

use types::UserAnalyticsDto;

/// Shared state for user analytics endpoints
#[derive(Clone)]
pub struct UsersApiState {
    pub service: UserAnalyticsService,
}

/// Build user analytics routes
pub fn routes(service: UserAnalyticsService) -> Router<()> {
    let state = UsersApiState { service };

    Router::new()
        .route("/", get(list_users))
        .route("/{user_id}", get(get_user))
        .with_state(state)
}

/// List every user with traces in the project, with analytics
#[utoipa::path(
    get,
    path = "/api/v1/project/{project_id}/users",
    tag = "users",
    params(
        ("project_id" = String, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "One summary per user, ordered by first trace", body = Vec<UserAnalyticsDto>),
        (status = 400, description = "Invalid project ID"),
        (status = 503, description = "Aggregation timed out")
    )
)]
pub async fn list_users(
    State(state): State<UsersApiState>,
    Path(project_id): Path<String>,
) -> Result<Json<Vec<UserAnalyticsDto>>, ApiError> {
    let summaries = state
        .service
        .list_users_with_analytics(&project_id)
        .await
        .map_err(ApiError::from_users)?;

    Ok(Json(
        summaries.into_iter().map(UserAnalyticsDto::from).collect(),
    ))
}

/// Analytics for one user (all zero when the user has no traces)
#[utoipa::path(
    get,
    path = "/api/v1/project/{project_id}/users/{user_id}",
    tag = "users",
    params(
        ("project_id" = String, Path, description = "Project ID"),
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User analytics summary", body = UserAnalyticsDto),
        (status = 400, description = "Invalid project or user ID"),
        (status = 503, description = "Aggregation timed out")
    )
)]
pub async fn get_user(
    State(state): State<UsersApiState>,
    Path((project_id, user_id)): Path<(String, String)>,
) -> Result<Json<UserAnalyticsDto>, ApiError> {
    let summary = state
        .service
        .get_user_analytics(&project_id, &user_id)
        .await
        .map_err(ApiError::from_users)?;

    Ok(Json(summary.into()))
}
