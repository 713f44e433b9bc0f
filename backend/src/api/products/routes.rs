//! Defines the HTTP routes for the product catalog proxy.

use super::handlers::*;
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub fn product_router() -> Router {
    Router::new()
        .route("/", get(get_products).post(create_product))
        .route("/total", get(get_product_totals))
        .route("/search", post(search_products))
        .route("/categories", get(get_categories))
        .route("/tags", get(get_tags))
        .route("/attributes", get(get_attributes))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route(
            "/{id}/variations",
            get(get_variations)
                .put(update_variations)
                .post(create_variations),
        )
        .layer(middleware::from_fn(jwt_auth))
}
