//! Handler functions for the order proxy endpoints.
//!
//! Orders live entirely in the commerce platform; these handlers are thin
//! passthroughs. Mutations record an activity entry after the upstream call
//! succeeds; a failed audit write is logged and never affects the response.

use crate::api::common::{
    ApiResponse, PaginationFilter, service_error_to_http, validation_error_response,
};
use crate::api::products::models::{SearchRequest, id_segment};
use crate::services::activity_service::ActivityService;
use crate::services::commerce::CommerceClient;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use validator::Validate;

fn order_link(order: &Value, fallback_id: &str) -> String {
    let id = order
        .get("id")
        .map(id_segment)
        .unwrap_or_else(|| fallback_id.to_string());
    format!("/orders/edit/{}", id)
}

/// Retrieves a page of orders, newest first.
#[axum::debug_handler]
pub async fn get_orders(
    Extension(commerce): Extension<CommerceClient>,
    Query(pagination): Query<PaginationFilter>,
) -> Result<Json<ApiResponse<Value>>, (StatusCode, String)> {
    let page = pagination.page().to_string();
    let per_page = pagination.per_page().to_string();

    let orders = commerce
        .get(
            "orders",
            &[("page", page.as_str()), ("per_page", per_page.as_str())],
        )
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        orders,
        "Orders retrieved successfully",
    )))
}

/// Retrieves a single order.
#[axum::debug_handler]
pub async fn get_order(
    Extension(commerce): Extension<CommerceClient>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Value>>, (StatusCode, String)> {
    let order = commerce
        .get(&format!("orders/{}", id), &[])
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        order,
        "Order retrieved successfully",
    )))
}

/// Creates an order.
#[axum::debug_handler]
pub async fn create_order(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Extension(commerce): Extension<CommerceClient>,
    Json(payload): Json<Value>,
) -> Result<Json<ApiResponse<Value>>, (StatusCode, String)> {
    let order = commerce
        .post("orders", &payload)
        .await
        .map_err(service_error_to_http)?;

    let order_id = order.get("id").map(id_segment).unwrap_or_default();

    ActivityService::new(&pool)
        .record(
            &claims.name,
            &claims.email,
            "order created",
            json!({ "link": order_link(&order, &order_id) }),
            None,
        )
        .await;

    Ok(Json(ApiResponse::success(
        order,
        "Order created successfully",
    )))
}

/// Updates an order and records the change.
#[axum::debug_handler]
pub async fn update_order(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Extension(commerce): Extension<CommerceClient>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<ApiResponse<Value>>, (StatusCode, String)> {
    let order = commerce
        .put(&format!("orders/{}", id), &payload)
        .await
        .map_err(service_error_to_http)?;

    ActivityService::new(&pool)
        .record(
            &claims.name,
            &claims.email,
            "order updated",
            json!({ "link": order_link(&order, &id) }),
            None,
        )
        .await;

    Ok(Json(ApiResponse::success(
        order,
        "Order updated successfully",
    )))
}

/// Deletes an order and records the deletion.
#[axum::debug_handler]
pub async fn delete_order(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Extension(commerce): Extension<CommerceClient>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Value>>, (StatusCode, String)> {
    let order = commerce
        .delete(&format!("orders/{}", id), &[("force", "true")])
        .await
        .map_err(service_error_to_http)?;

    ActivityService::new(&pool)
        .record(
            &claims.name,
            &claims.email,
            "order deleted",
            json!({ "id": id }),
            None,
        )
        .await;

    Ok(Json(ApiResponse::success(
        order,
        "Order deleted successfully",
    )))
}

/// Searches orders.
#[axum::debug_handler]
pub async fn search_orders(
    Extension(commerce): Extension<CommerceClient>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<ApiResponse<Value>>, (StatusCode, String)> {
    if let Err(errors) = payload.validate() {
        return Err(validation_error_response(errors));
    }

    let orders = commerce
        .get(
            "orders",
            &[("per_page", "100"), ("search", payload.value.as_str())],
        )
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        orders,
        "Orders retrieved successfully",
    )))
}
