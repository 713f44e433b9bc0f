//! JWT token utilities for authentication and authorization.
//!
//! Provides access-token and refresh-token creation and validation for the
//! admin session flow. Access tokens embed the user identity; refresh tokens
//! carry only the user id and live considerably longer.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::database::models::User;
use crate::errors::ServiceError;

/// JWT claims for portal tokens.
///
/// Refresh tokens reuse this structure with the identity fields left empty;
/// only `sub` matters when a refresh token is decoded.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

impl Claims {
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    pub fn is_admin(&self) -> bool {
        self.has_role("Admin")
    }
}

/// JWT token utility for creating and validating tokens
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_seconds: u64,
    refresh_expires_in_days: u64,
}

impl JwtUtils {
    /// Create a new JwtUtils instance with keys from environment
    pub fn new() -> Result<Self, ServiceError> {
        let config = crate::config::Config::from_env()
            .map_err(|e| ServiceError::internal(format!("Config error: {}", e)))?;

        Ok(Self::with_secret(
            &config.jwt_secret,
            config.jwt_expires_in_seconds,
            config.refresh_expires_in_days,
        ))
    }

    /// Create a JwtUtils instance from an explicit secret and lifetimes.
    pub fn with_secret(secret: &str, expires_in_seconds: u64, refresh_expires_in_days: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        JwtUtils {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expires_in_seconds,
            refresh_expires_in_days,
        }
    }

    /// Generate a new access token for the given user.
    ///
    /// Returns the encoded token together with its expiry timestamp
    /// (seconds since the epoch), which is echoed to the client.
    pub fn generate_access_token(&self, user: &User) -> Result<(String, i64), ServiceError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expires_in_seconds as i64);

        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal(format!("Token generation failed: {}", e)))?;

        Ok((token, exp.timestamp()))
    }

    /// Generate a refresh token carrying only the user id.
    pub fn generate_refresh_token(&self, user_id: &str) -> Result<String, ServiceError> {
        let now = Utc::now();
        let exp = now + Duration::days(self.refresh_expires_in_days as i64);

        let claims = Claims {
            sub: user_id.to_string(),
            email: String::new(),
            name: String::new(),
            role: String::new(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal(format!("Refresh token generation failed: {}", e)))
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| ServiceError::unauthorized(format!("Token validation failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_user() -> User {
        User {
            id: "user-42".to_string(),
            name: "Jo Admin".to_string(),
            email: "jo@cleanair.com".to_string(),
            password_hash: "hash".to_string(),
            role: "Admin".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn access_token_round_trips_identity() {
        let jwt = JwtUtils::with_secret("test-secret", 900, 30);
        let (token, expired_at) = jwt.generate_access_token(&sample_user()).unwrap();

        let claims = jwt.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "user-42");
        assert_eq!(claims.email, "jo@cleanair.com");
        assert!(claims.is_admin());
        assert_eq!(claims.exp as i64, expired_at);
    }

    #[test]
    fn refresh_token_decodes_to_user_id_only() {
        let jwt = JwtUtils::with_secret("test-secret", 900, 30);
        let token = jwt.generate_refresh_token("user-42").unwrap();

        let claims = jwt.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "user-42");
        assert!(claims.email.is_empty());
        assert!(claims.role.is_empty());
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let issuer = JwtUtils::with_secret("secret-a", 900, 30);
        let verifier = JwtUtils::with_secret("secret-b", 900, 30);

        let (token, _) = issuer.generate_access_token(&sample_user()).unwrap();
        assert!(verifier.validate_token(&token).is_err());
    }
}
