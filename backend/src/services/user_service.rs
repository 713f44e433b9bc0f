//! User business logic service.
//!
//! Handles admin-user creation, authentication, and profile management.

use crate::database::models::{CreateUserRequest, UpdateUserRequest, User, UserProfile};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

pub struct UserService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new admin user with full validation.
    ///
    /// # Errors
    /// Returns `ServiceError::AlreadyExists` when another user already holds
    /// the email; no write is performed in that case.
    pub async fn create_user(&self, request: CreateUserRequest) -> ServiceResult<UserProfile> {
        if let Err(validation_errors) = request.validate() {
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

        let repo = UserRepository::new(self.pool);

        if repo.email_exists(&request.email).await? {
            return Err(ServiceError::already_exists("User", &request.email));
        }

        let password_hash = Self::hash_password(&request.password)?;
        let now = Utc::now();

        let user = User {
            id: Uuid::now_v7().to_string(),
            name: request.name,
            email: request.email,
            password_hash,
            role: request.role.unwrap_or_else(|| "Editor".to_string()),
            created_at: now,
            updated_at: now,
        };

        repo.create_user(&user).await?;
        Ok(user.into())
    }

    /// Authenticates a user by email and password.
    ///
    /// # Errors
    /// Returns `ServiceError::Unauthorized` for an unknown email or a
    /// non-matching password; callers cannot distinguish the two.
    pub async fn authenticate_user(&self, email: &str, password: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);

        let user = repo
            .get_user_by_email(email)
            .await?
            .ok_or_else(|| ServiceError::unauthorized("Username or Password is wrong"))?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(ServiceError::unauthorized("Username or Password is wrong"));
        }

        Ok(user)
    }

    /// Retrieves a user by ID with existence verification.
    pub async fn get_user_required(&self, id: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;
        Ok(user)
    }

    /// Lists all users with password hashes stripped.
    pub async fn list_users(&self) -> ServiceResult<Vec<UserProfile>> {
        let repo = UserRepository::new(self.pool);
        let users = repo.list_users().await?;
        Ok(users.into_iter().map(UserProfile::from).collect())
    }

    /// Applies a partial update to a user.
    pub async fn update_user(
        &self,
        id: &str,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserProfile> {
        if let Err(validation_errors) = request.validate() {
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

        let repo = UserRepository::new(self.pool);
        let mut user = self.get_user_required(id).await?;

        if let Some(name) = request.name {
            user.name = name;
        }
        if let Some(email) = request.email {
            user.email = email;
        }
        if let Some(role) = request.role {
            user.role = role;
        }
        if let Some(password) = request.password {
            user.password_hash = Self::hash_password(&password)?;
        }
        user.updated_at = Utc::now();

        if !repo.update_user(&user).await? {
            return Err(ServiceError::not_found("User", id));
        }

        Ok(user.into())
    }

    /// Deletes a user and returns the remaining user list.
    pub async fn delete_user(&self, id: &str) -> ServiceResult<Vec<UserProfile>> {
        let repo = UserRepository::new(self.pool);

        if !repo.delete_user(id).await? {
            return Err(ServiceError::not_found("User", id));
        }

        self.list_users().await
    }

    /// Replaces a user's password, as the final step of the reset flow.
    pub async fn reset_password(&self, id: &str, password: &str) -> ServiceResult<()> {
        let repo = UserRepository::new(self.pool);
        let password_hash = Self::hash_password(password)?;

        if !repo.update_password(id, &password_hash).await? {
            return Err(ServiceError::not_found("User", id));
        }

        Ok(())
    }

    /// Function to hash a password before storing in database
    fn hash_password(password: &str) -> ServiceResult<String> {
        hash(password, DEFAULT_COST)
            .map_err(|e| ServiceError::internal(format!("Password hashing failed: {}", e)))
    }

    /// Function to verify a password against the stored hash
    fn verify_password(password: &str, hash: &str) -> ServiceResult<bool> {
        verify(password, hash)
            .map_err(|e| ServiceError::internal(format!("Password verification failed: {}", e)))
    }
}
