//! OpenAPI specification

use axum::http::header;
use axum::response::{IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "TraceLens API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Per-user trace analytics"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "users", description = "Per-user analytics")
    ),
    paths(
        health::health,
        users::list_users,
        users::get_user,
    ),
    components(schemas(
        health::HealthResponse,
        users::types::UserAnalyticsDto,
        users::types::ScoreDto,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}
