//! Handler functions for admin-user management API endpoints.
//!
//! These functions process requests for creating, listing, editing, and
//! deleting portal users. Password hashes never leave the service layer;
//! every payload returned here is a sanitized profile. Mutations are
//! recorded in the activity log as a side effect.

use crate::api::common::{ApiResponse, service_error_to_http};
use crate::database::models::{CreateUserRequest, UpdateUserRequest, UserProfile};
use crate::services::activity_service::ActivityService;
use crate::services::user_service::UserService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use serde_json::json;
use sqlx::SqlitePool;

/// Registers a new portal user.
///
/// A duplicate email answers 403 and performs no write.
#[axum::debug_handler]
pub async fn register_user(
    Extension(pool): Extension<SqlitePool>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserProfile>>, (StatusCode, String)> {
    let email = payload.email.clone();

    let user_service = UserService::new(&pool);
    let user = user_service
        .create_user(payload)
        .await
        .map_err(service_error_to_http)?;

    ActivityService::new(&pool)
        .record(&user.name, &email, "user created", json!({}), None)
        .await;

    Ok(Json(ApiResponse::success(
        user,
        "User created successfully",
    )))
}

/// Lists all portal users, password hashes stripped.
#[axum::debug_handler]
pub async fn get_users(
    Extension(pool): Extension<SqlitePool>,
) -> Result<Json<ApiResponse<Vec<UserProfile>>>, (StatusCode, String)> {
    let user_service = UserService::new(&pool);
    let users = user_service
        .list_users()
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        users,
        "Users retrieved successfully",
    )))
}

/// Retrieves a single user by id.
#[axum::debug_handler]
pub async fn get_user_by_id(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserProfile>>, (StatusCode, String)> {
    let user_service = UserService::new(&pool);
    let user = user_service
        .get_user_required(&id)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        UserProfile::from(user),
        "User retrieved successfully",
    )))
}

/// Applies a partial update to a user and records the change.
#[axum::debug_handler]
pub async fn update_user(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserProfile>>, (StatusCode, String)> {
    let user_service = UserService::new(&pool);
    let user = user_service
        .update_user(&id, payload)
        .await
        .map_err(service_error_to_http)?;

    ActivityService::new(&pool)
        .record(
            &claims.name,
            &claims.email,
            "user updated",
            json!({ "name": user.name, "email": user.email }),
            None,
        )
        .await;

    Ok(Json(ApiResponse::success(
        user,
        "User updated successfully",
    )))
}

/// Deletes a user and returns the remaining user list.
#[axum::debug_handler]
pub async fn delete_user(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<UserProfile>>>, (StatusCode, String)> {
    let user_service = UserService::new(&pool);
    let remaining = user_service
        .delete_user(&id)
        .await
        .map_err(service_error_to_http)?;

    ActivityService::new(&pool)
        .record(
            &claims.name,
            &claims.email,
            "user deleted",
            json!({ "id": id }),
            None,
        )
        .await;

    Ok(Json(ApiResponse::success(
        remaining,
        "User deleted successfully",
    )))
}
