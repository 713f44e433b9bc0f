//! Defines the HTTP routes for the activity log.

use super::handlers::*;
use crate::auth::middleware::jwt_auth;
use axum::{Router, middleware, routing::get};

pub fn activity_router() -> Router {
    Router::new()
        .route("/", get(get_activity))
        .layer(middleware::from_fn(jwt_auth))
}
