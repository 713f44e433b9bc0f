//! Data structures for authentication-related entities.
//!
//! This module defines request and response payloads for the session flow:
//! login, refresh, and the password-reset endpoints.

use crate::database::models::UserProfile;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Session payload returned by login and verify: the sanitized user, the
/// access token, and the token's expiry timestamp (seconds since epoch).
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: UserProfile,
    pub token: String,
    pub expired_at: i64,
}

/// Password-reset request (step one: send the reset link)
#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

/// Password-reset completion (step two: store the new password)
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "User id is required"))]
    pub id: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}
