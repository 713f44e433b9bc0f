//! Defines the HTTP routes for the order proxy.

use super::handlers::*;
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub fn order_router() -> Router {
    Router::new()
        .route("/", get(get_orders).post(create_order))
        .route("/search", post(search_orders))
        .route(
            "/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .layer(middleware::from_fn(jwt_auth))
}
