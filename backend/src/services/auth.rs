//! Auth service: registration, login and profile management
//!
//! # Performance Optimizations
//!
//! - Password hashing/verification runs on the blocking thread pool
//! - The JWT service holds pre-computed keys

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{NewUser, UpdateUser, UserRepository};
use fitness_goals_shared::validation::{
    validate_email, validate_login, validate_registration, validate_required,
};
use fitness_goals_shared::{AuthError, LoginRequest, RegisterRequest, UpdateProfileRequest, User};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// User service for authentication operations
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt: JwtService) -> Self {
        Self { users, jwt }
    }

    /// Register a new user
    ///
    /// Returns the public view of the created user; the hash stays in the
    /// directory.
    #[instrument(skip(self, req))]
    pub async fn register(&self, req: &RegisterRequest) -> Result<User, ApiError> {
        let (name, email, password) = validate_registration(
            req.name.as_deref(),
            req.email.as_deref(),
            req.password.as_deref(),
        )?;

        if self.users.email_exists(email).await? {
            warn!("Registration for an email that is already taken");
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password_hash = PasswordService::hash_async(password.to_string()).await?;

        // A concurrent registration can still win the race; the unique
        // constraint turns that into a conflict as well.
        let user = self
            .users
            .create(NewUser {
                name: name.trim().to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "User registered");
        Ok(user.into_public())
    }

    /// Login with email and password, returning a session token
    ///
    /// Malformed input, unknown email and wrong password all fail with
    /// `InvalidCredentials`.
    #[instrument(skip(self, req))]
    pub async fn login(&self, req: &LoginRequest) -> Result<String, ApiError> {
        let (email, password) = validate_login(req.email.as_deref(), req.password.as_deref())
            .map_err(|e| {
                debug!(field = %e.field, "Malformed login request");
                AuthError::InvalidCredentials
            })?;

        let Some(user) = self.users.find_by_email(email).await? else {
            PasswordService::verify_dummy_async(password.to_string()).await;
            warn!("Login attempt for unknown email");
            return Err(AuthError::InvalidCredentials.into());
        };

        let valid = PasswordService::verify_async(password.to_string(), user.password_hash).await?;
        if !valid {
            warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.jwt.issue(user.id)?;

        info!(user_id = user.id, "User logged in");
        Ok(token)
    }

    /// Get the profile of the authenticated user
    pub async fn get_profile(&self, user_id: i64) -> Result<User, ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::NotAuthenticated)?;

        Ok(user.into_public())
    }

    /// Update name and/or email of the authenticated user
    #[instrument(skip(self, req))]
    pub async fn update_profile(
        &self,
        user_id: i64,
        req: &UpdateProfileRequest,
    ) -> Result<User, ApiError> {
        let name = match req.name.as_deref() {
            Some(name) => Some(validate_required("name", Some(name))?.trim().to_string()),
            None => None,
        };
        let email = match req.email.as_deref() {
            Some(email) => {
                validate_email(email)?;
                Some(email.to_string())
            }
            None => None,
        };

        let user = self
            .users
            .update_profile(user_id, UpdateUser { name, email })
            .await?
            .ok_or(AuthError::NotAuthenticated)?;

        info!(user_id, "Profile updated");
        Ok(user.into_public())
    }

    /// The token service this auth service issues with
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
