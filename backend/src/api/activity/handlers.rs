//! Handler functions for the activity-log endpoints.

use crate::api::common::{
    ApiResponse, PaginatedData, PaginationFilter, PaginationMeta, service_error_to_http,
};
use crate::database::models::ActivityEntry;
use crate::errors::ServiceError;
use crate::repositories::activity_repository::ActivityRepository;
use axum::{
    extract::{Extension, Json, Query},
    http::StatusCode,
};
use sqlx::SqlitePool;

/// Retrieves a page of activity entries, newest first.
#[axum::debug_handler]
pub async fn get_activity(
    Extension(pool): Extension<SqlitePool>,
    Query(pagination): Query<PaginationFilter>,
) -> Result<Json<ApiResponse<PaginatedData<ActivityEntry>>>, (StatusCode, String)> {
    let repo = ActivityRepository::new(&pool);

    let total = repo
        .count_entries()
        .await
        .map_err(|e| service_error_to_http(ServiceError::from(e)))?;
    let entries = repo
        .list_entries(pagination.limit(), pagination.offset())
        .await
        .map_err(|e| service_error_to_http(ServiceError::from(e)))?;

    let meta = PaginationMeta::from_filter(&pagination, total);
    Ok(Json(ApiResponse::paginated(
        PaginatedData::new(entries, total),
        meta,
        "Activity retrieved successfully",
    )))
}
