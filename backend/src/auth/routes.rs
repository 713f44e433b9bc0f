//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle login, token refresh, logout, and the password-reset
//! flow; all of them are public by design. They are designed to be nested
//! under `/admin` in the main Axum router.

use crate::auth::handlers::*;
use axum::{Router, routing::post};

/// Creates the authentication router with all session-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/verify", post(verify))
        .route("/logout", post(logout))
        .route("/forgot", post(forgot_password))
        .route("/reset", post(reset_password))
}
