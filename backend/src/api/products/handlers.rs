//! Handler functions for the product proxy endpoints.
//!
//! Each handler translates the request into one commerce-API call. Reads are
//! straight passthroughs (single-product reads are enriched with the local
//! user note); mutations additionally record an activity entry, upsert the
//! note record, and, for updates, send a notification email. Side effects
//! run after the upstream call has succeeded and their failures are logged,
//! never surfaced.

use crate::api::common::{
    ApiResponse, PaginationFilter, service_error_to_http, validation_error_response,
};
use crate::api::products::models::*;
use crate::repositories::note_repository::NoteRepository;
use crate::services::activity_service::ActivityService;
use crate::services::commerce::CommerceClient;
use crate::services::email_service::EmailService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use std::sync::Arc;
use validator::Validate;

fn product_field<'a>(product: &'a Value, field: &str) -> &'a str {
    product.get(field).and_then(Value::as_str).unwrap_or("")
}

fn product_link(product: &Value, fallback_id: &str) -> String {
    let id = product
        .get("id")
        .map(id_segment)
        .unwrap_or_else(|| fallback_id.to_string());
    format!("/products/edit/{}", id)
}

/// Retrieves catalog-wide product totals.
#[axum::debug_handler]
pub async fn get_product_totals(
    Extension(commerce): Extension<CommerceClient>,
) -> Result<Json<ApiResponse<Value>>, (StatusCode, String)> {
    let totals = commerce
        .get("reports/products/totals", &[])
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        totals,
        "Product totals retrieved successfully",
    )))
}

/// Retrieves a page of published products.
#[axum::debug_handler]
pub async fn get_products(
    Extension(commerce): Extension<CommerceClient>,
    Query(pagination): Query<PaginationFilter>,
) -> Result<Json<ApiResponse<Value>>, (StatusCode, String)> {
    let page = pagination.page().to_string();
    let per_page = pagination.per_page().to_string();

    let products = commerce
        .get(
            "products",
            &[
                ("page", page.as_str()),
                ("per_page", per_page.as_str()),
                ("status", "publish"),
            ],
        )
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        products,
        "Products retrieved successfully",
    )))
}

/// Retrieves a single product, enriched with the local user note when one
/// exists for that id.
#[axum::debug_handler]
pub async fn get_product(
    Extension(pool): Extension<SqlitePool>,
    Extension(commerce): Extension<CommerceClient>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Value>>, (StatusCode, String)> {
    let mut product = commerce
        .get(&format!("products/{}", id), &[])
        .await
        .map_err(service_error_to_http)?;

    let note_repo = NoteRepository::new(&pool);
    match note_repo.get_by_target_id(&id).await {
        Ok(Some(note)) => {
            if let Value::Object(map) = &mut product {
                map.insert("userNote".to_string(), Value::String(note.user_note));
            }
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("Failed to load note for product {}: {}", id, e),
    }

    Ok(Json(ApiResponse::success(
        product,
        "Product retrieved successfully",
    )))
}

/// Retrieves all variations of a product.
#[axum::debug_handler]
pub async fn get_variations(
    Extension(commerce): Extension<CommerceClient>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Value>>, (StatusCode, String)> {
    let variations = commerce
        .get(
            &format!("products/{}/variations", id),
            &[("page", "1"), ("per_page", "99")],
        )
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        variations,
        "Variations retrieved successfully",
    )))
}

/// Applies a bulk variation update, one upstream call per variation.
#[axum::debug_handler]
pub async fn update_variations(
    Extension(commerce): Extension<CommerceClient>,
    Path(id): Path<String>,
    Json(variations): Json<Vec<VariationUpdate>>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, String)> {
    for variation in &variations {
        commerce
            .put(
                &format!("products/{}/variations/{}", id, id_segment(&variation.id)),
                &variation.data,
            )
            .await
            .map_err(service_error_to_http)?;
    }

    Ok(Json(ApiResponse::success(
        (),
        "Variations updated successfully",
    )))
}

/// Creates variations in bulk, one upstream call per variation.
#[axum::debug_handler]
pub async fn create_variations(
    Extension(commerce): Extension<CommerceClient>,
    Path(id): Path<String>,
    Json(variations): Json<Vec<VariationCreate>>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, String)> {
    for variation in &variations {
        commerce
            .post(&format!("products/{}/variations", id), &variation.data)
            .await
            .map_err(service_error_to_http)?;
    }

    Ok(Json(ApiResponse::success(
        (),
        "Variations created successfully",
    )))
}

/// Creates a product; records the creation and stores the note.
#[axum::debug_handler]
pub async fn create_product(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Extension(commerce): Extension<CommerceClient>,
    Json(payload): Json<ProductWriteRequest>,
) -> Result<Json<ApiResponse<Value>>, (StatusCode, String)> {
    let product = commerce
        .post("products", &payload.data)
        .await
        .map_err(service_error_to_http)?;

    let product_id = product.get("id").map(id_segment).unwrap_or_default();

    ActivityService::new(&pool)
        .record(
            &claims.name,
            &claims.email,
            "product created",
            json!({
                "name": product_field(&product, "name"),
                "link": product_link(&product, &product_id),
            }),
            payload.user_note.as_deref(),
        )
        .await;

    if let Some(note) = &payload.user_note {
        if let Err(e) = NoteRepository::new(&pool).upsert(&product_id, note).await {
            tracing::warn!("Failed to store note for product {}: {}", product_id, e);
        }
    }

    Ok(Json(ApiResponse::success(
        product,
        "Product created successfully",
    )))
}

/// Updates a product; records the change, stores the note, and emails a
/// summary to the store team.
#[axum::debug_handler]
pub async fn update_product(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Extension(commerce): Extension<CommerceClient>,
    Extension(email_service): Extension<Arc<EmailService>>,
    Path(id): Path<String>,
    Json(payload): Json<ProductWriteRequest>,
) -> Result<Json<ApiResponse<Value>>, (StatusCode, String)> {
    let product = commerce
        .put(&format!("products/{}", id), &payload.data)
        .await
        .map_err(service_error_to_http)?;

    ActivityService::new(&pool)
        .record(
            &claims.name,
            &claims.email,
            "product updated",
            json!({
                "name": product_field(&product, "name"),
                "link": product_link(&product, &id),
            }),
            payload.user_note.as_deref(),
        )
        .await;

    if let Some(note) = &payload.user_note {
        if let Err(e) = NoteRepository::new(&pool).upsert(&id, note).await {
            tracing::warn!("Failed to store note for product {}: {}", id, e);
        }
    }

    if let Err(e) = email_service
        .send_product_update_notification(
            &claims.name,
            product_field(&product, "name"),
            product_field(&product, "permalink"),
            payload.user_note.as_deref().unwrap_or(""),
        )
        .await
    {
        tracing::warn!("Failed to send product update notification: {}", e);
    }

    Ok(Json(ApiResponse::success(
        product,
        "Product updated successfully",
    )))
}

/// Deletes a product and records the deletion.
#[axum::debug_handler]
pub async fn delete_product(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Extension(commerce): Extension<CommerceClient>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Value>>, (StatusCode, String)> {
    let product = commerce
        .delete(&format!("products/{}", id), &[("force", "true")])
        .await
        .map_err(service_error_to_http)?;

    ActivityService::new(&pool)
        .record(
            &claims.name,
            &claims.email,
            "product deleted",
            json!({
                "name": product_field(&product, "name"),
                "link": product_link(&product, &id),
            }),
            None,
        )
        .await;

    Ok(Json(ApiResponse::success(
        product,
        "Product deleted successfully",
    )))
}

/// Searches the catalog.
#[axum::debug_handler]
pub async fn search_products(
    Extension(commerce): Extension<CommerceClient>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<ApiResponse<Value>>, (StatusCode, String)> {
    if let Err(errors) = payload.validate() {
        return Err(validation_error_response(errors));
    }

    let products = commerce
        .get(
            "products",
            &[("per_page", "100"), ("search", payload.value.as_str())],
        )
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        products,
        "Products retrieved successfully",
    )))
}

/// Retrieves all product categories.
#[axum::debug_handler]
pub async fn get_categories(
    Extension(commerce): Extension<CommerceClient>,
) -> Result<Json<ApiResponse<Value>>, (StatusCode, String)> {
    let categories = commerce
        .get("products/categories", &[("per_page", "99")])
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        categories,
        "Categories retrieved successfully",
    )))
}

/// Retrieves all product tags.
#[axum::debug_handler]
pub async fn get_tags(
    Extension(commerce): Extension<CommerceClient>,
) -> Result<Json<ApiResponse<Value>>, (StatusCode, String)> {
    let tags = commerce
        .get("products/tags", &[("per_page", "99")])
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        tags,
        "Tags retrieved successfully",
    )))
}

/// Retrieves all product attributes.
#[axum::debug_handler]
pub async fn get_attributes(
    Extension(commerce): Extension<CommerceClient>,
) -> Result<Json<ApiResponse<Value>>, (StatusCode, String)> {
    let attributes = commerce
        .get("products/attributes", &[])
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        attributes,
        "Attributes retrieved successfully",
    )))
}
