//! Handler functions for session-related API endpoints.
//!
//! These functions process incoming HTTP requests for login, token refresh,
//! logout, and the password-reset flow. Cookie plumbing lives here: the
//! refresh token travels as an HTTP-only cookie and the anti-forgery token
//! as a script-readable cookie echoed back on refresh calls.

use crate::api::common::{ApiResponse, service_error_to_http, validation_error_response};
use crate::auth::models::*;
use crate::auth::service::{IssuedSession, SessionService};
use crate::auth::session_store::SessionStore;
use crate::errors::ServiceError;
use crate::repositories::user_repository::UserRepository;
use crate::services::email_service::EmailService;
use crate::services::user_service::UserService;
use axum::{
    extract::{Extension, Json},
    http::{HeaderMap, StatusCode},
    response::Json as ResponseJson,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sqlx::SqlitePool;
use std::sync::Arc;
use validator::Validate;

/// HTTP-only cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "refreshToken";
/// Script-readable cookie carrying the current anti-forgery token.
pub const XSRF_COOKIE: &str = "XSRF-TOKEN";
/// Header the frontend echoes the anti-forgery token in.
pub const XSRF_HEADER: &str = "x-xsrf-token";

fn refresh_cookie(value: String) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn xsrf_cookie(value: String) -> Cookie<'static> {
    Cookie::build((XSRF_COOKIE, value))
        .path("/")
        .same_site(SameSite::Lax)
        .build()
}

fn session_response(session: IssuedSession) -> ApiResponse<SessionResponse> {
    ApiResponse::success(
        SessionResponse {
            user: session.user,
            token: session.token,
            expired_at: session.expired_at,
        },
        "Session established",
    )
}

/// Handle admin login: set both session cookies and return the access token.
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(store): Extension<SessionStore>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, ResponseJson<ApiResponse<SessionResponse>>), (StatusCode, String)> {
    let session_service = match SessionService::new(&pool, store) {
        Ok(service) => service,
        Err(error) => return Err(service_error_to_http(error)),
    };

    let session = session_service
        .login(payload)
        .await
        .map_err(service_error_to_http)?;

    let jar = jar
        .add(refresh_cookie(session.refresh_token.clone()))
        .add(xsrf_cookie(session.xsrf_token.clone()));

    Ok((jar, ResponseJson(session_response(session))))
}

/// Handle token refresh.
///
/// Requires the refresh-token cookie plus the anti-forgery value, taken from
/// the `X-XSRF-TOKEN` header or, failing that, the `XSRF-TOKEN` cookie. Any
/// missing or mismatched piece yields 401.
#[axum::debug_handler]
pub async fn verify(
    Extension(pool): Extension<SqlitePool>,
    Extension(store): Extension<SessionStore>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<(CookieJar, ResponseJson<ApiResponse<SessionResponse>>), (StatusCode, String)> {
    let refresh_token = jar
        .get(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| service_error_to_http(ServiceError::unauthorized("Invalid session")))?;

    let xsrf_token = headers
        .get(XSRF_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
        .or_else(|| jar.get(XSRF_COOKIE).map(|cookie| cookie.value().to_string()))
        .ok_or_else(|| service_error_to_http(ServiceError::unauthorized("Invalid session")))?;

    let session_service = match SessionService::new(&pool, store) {
        Ok(service) => service,
        Err(error) => return Err(service_error_to_http(error)),
    };

    let session = session_service
        .refresh(&refresh_token, &xsrf_token)
        .await
        .map_err(service_error_to_http)?;

    // The refresh cookie stays as-is; only the anti-forgery value rotates.
    let jar = jar.add(xsrf_cookie(session.xsrf_token.clone()));

    Ok((jar, ResponseJson(session_response(session))))
}

/// Handle logout: clear both cookies and drop the server-side session entry.
/// Always answers 204, whatever the prior session state.
#[axum::debug_handler]
pub async fn logout(
    Extension(store): Extension<SessionStore>,
    jar: CookieJar,
) -> (CookieJar, StatusCode) {
    if let Some(cookie) = jar.get(REFRESH_COOKIE) {
        store.remove(cookie.value()).await;
    }

    let jar = jar
        .remove(refresh_cookie(String::new()))
        .remove(xsrf_cookie(String::new()));

    (jar, StatusCode::NO_CONTENT)
}

/// Handle a password-reset request by mailing a reset link.
///
/// Mail delivery is a side effect: once the user is found the response is
/// 200 even if the send fails, which is only logged.
#[axum::debug_handler]
pub async fn forgot_password(
    Extension(pool): Extension<SqlitePool>,
    Extension(email_service): Extension<Arc<EmailService>>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<ResponseJson<ApiResponse<()>>, (StatusCode, String)> {
    if let Err(errors) = payload.validate() {
        return Err(validation_error_response(errors));
    }

    let repo = UserRepository::new(&pool);
    let user = repo
        .get_user_by_email(&payload.email)
        .await
        .map_err(|e| service_error_to_http(ServiceError::Database { source: e }))?
        .ok_or_else(|| service_error_to_http(ServiceError::not_found("User", &payload.email)))?;

    if let Err(e) = email_service
        .send_password_reset_email(&user.email, &user.id)
        .await
    {
        tracing::warn!("Failed to send password reset email to {}: {}", user.email, e);
    }

    Ok(ResponseJson(ApiResponse::success((), "Reset email sent")))
}

/// Handle password-reset completion.
#[axum::debug_handler]
pub async fn reset_password(
    Extension(pool): Extension<SqlitePool>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<ResponseJson<ApiResponse<()>>, (StatusCode, String)> {
    if let Err(errors) = payload.validate() {
        return Err(validation_error_response(errors));
    }

    let user_service = UserService::new(&pool);
    user_service
        .reset_password(&payload.id, &payload.password)
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(ApiResponse::success((), "Password updated")))
}
