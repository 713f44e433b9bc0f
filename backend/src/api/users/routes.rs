//! Defines the HTTP routes for admin-user management.
//!
//! Registration is public; every other user operation requires a valid
//! access token.

use super::handlers::*;
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub fn user_router() -> Router {
    Router::new()
        .route("/users", get(get_users))
        .route(
            "/users/{id}",
            get(get_user_by_id).put(update_user).delete(delete_user),
        )
        .layer(middleware::from_fn(jwt_auth))
        .route("/register", post(register_user))
}
