//! Core business logic for the session manager.
//!
//! Issues, validates, and rotates access tokens, refresh tokens, and their
//! paired anti-forgery tokens. Cookie handling stays in the handlers; this
//! service only deals in token values.

use crate::auth::models::LoginRequest;
use crate::auth::session_store::SessionStore;
use crate::database::models::UserProfile;
use crate::errors::{ServiceError, ServiceResult};
use crate::services::user_service::UserService;
use crate::utils::jwt::JwtUtils;
use crate::utils::random::generate_random_string;
use sqlx::SqlitePool;
use validator::Validate;

const XSRF_TOKEN_LENGTH: usize = 32;

/// Everything a successful login or refresh produces. The handler turns the
/// refresh and anti-forgery tokens into cookies and returns the rest as JSON.
pub struct IssuedSession {
    pub user: UserProfile,
    pub token: String,
    pub expired_at: i64,
    pub refresh_token: String,
    pub xsrf_token: String,
}

/// Session service handling login and token refresh. Logout needs no
/// business logic beyond dropping the store entry, which the handler does
/// directly.
pub struct SessionService<'a> {
    pool: &'a SqlitePool,
    jwt_utils: JwtUtils,
    store: SessionStore,
}

impl<'a> SessionService<'a> {
    /// Create a new SessionService instance
    pub fn new(pool: &'a SqlitePool, store: SessionStore) -> ServiceResult<Self> {
        let jwt_utils = JwtUtils::new()?;

        Ok(SessionService {
            pool,
            jwt_utils,
            store,
        })
    }

    /// Authenticate a user and open a session.
    ///
    /// Generates the access token, a refresh token, and an anti-forgery
    /// token, and records the refresh→anti-forgery pairing in the session
    /// store. Credential failures surface as `Unauthorized`.
    pub async fn login(&self, login_request: LoginRequest) -> ServiceResult<IssuedSession> {
        if let Err(validation_errors) = login_request.validate() {
            let error_messages: Vec<String> = validation_errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| {
                        format!(
                            "{}: {}",
                            field,
                            error.message.as_ref().unwrap_or(&"Invalid value".into())
                        )
                    })
                })
                .collect();
            return Err(ServiceError::validation(error_messages.join(", ")));
        }

        let user_service = UserService::new(self.pool);
        let user = user_service
            .authenticate_user(&login_request.email, &login_request.password)
            .await?;

        let (token, expired_at) = self.jwt_utils.generate_access_token(&user)?;
        let refresh_token = self.jwt_utils.generate_refresh_token(&user.id)?;
        let xsrf_token = generate_random_string(XSRF_TOKEN_LENGTH);

        self.store.insert(&refresh_token, &xsrf_token).await;

        Ok(IssuedSession {
            user: user.into(),
            token,
            expired_at,
            refresh_token,
            xsrf_token,
        })
    }

    /// Mint a fresh access token from a refresh token.
    ///
    /// Requires the anti-forgery value presented alongside the refresh token
    /// to equal the value recorded at issuance or the last refresh. Success
    /// rotates the anti-forgery token; the old value becomes invalid. Every
    /// failure mode is `Unauthorized`, never a partial success.
    pub async fn refresh(
        &self,
        refresh_token: &str,
        xsrf_token: &str,
    ) -> ServiceResult<IssuedSession> {
        if !self.store.matches(refresh_token, xsrf_token).await {
            return Err(ServiceError::unauthorized("Invalid session"));
        }

        let claims = self
            .jwt_utils
            .validate_token(refresh_token)
            .map_err(|_| ServiceError::unauthorized("Invalid session"))?;

        let user_service = UserService::new(self.pool);
        let user = user_service
            .get_user_required(&claims.sub)
            .await
            .map_err(|_| ServiceError::unauthorized("Invalid session"))?;

        let (token, expired_at) = self.jwt_utils.generate_access_token(&user)?;
        let next_xsrf_token = generate_random_string(XSRF_TOKEN_LENGTH);

        self.store.insert(refresh_token, &next_xsrf_token).await;

        Ok(IssuedSession {
            user: user.into(),
            token,
            expired_at,
            refresh_token: refresh_token.to_string(),
            xsrf_token: next_xsrf_token,
        })
    }
}
