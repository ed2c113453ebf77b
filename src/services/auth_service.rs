//! Authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    config::JwtConfig,
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::User,
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Login with username/email and password. Only admins may sign in here.
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtConfig,
        identifier: &str,
        password: &str,
    ) -> AppResult<(User, String, i64)> {
        // Find user
        let user = UserRepository::find_by_identifier(pool, identifier)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        // Verify password
        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        // Check if banned
        if user.is_currently_banned() {
            return Err(AppError::Forbidden(format!(
                "Account banned: {}",
                user.ban_reason.as_deref().unwrap_or("No reason provided")
            )));
        }

        if !user.is_admin() {
            tracing::warn!(user_id = %user.id, "Non-admin login attempt on moderation API");
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        UserRepository::update_last_login(pool, &user.id).await?;

        let (access_token, expires_in) = Self::generate_access_token(&user, jwt)?;

        tracing::info!(user_id = %user.id, username = %user.username, "Admin logged in");

        Ok((user, access_token, expires_in))
    }

    /// Get user by ID
    pub async fn get_user_by_id(pool: &PgPool, user_id: &Uuid) -> AppResult<Option<User>> {
        UserRepository::find_by_id(pool, user_id).await
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Hash password using Argon2
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Generate access token for a user
    fn generate_access_token(user: &User, jwt: &JwtConfig) -> AppResult<(String, i64)> {
        Self::issue_token(&user.id, &user.username, &user.role, jwt)
    }

    /// Sign a token for the given identity. Returns the token and its lifetime in seconds.
    pub fn issue_token(
        user_id: &Uuid,
        username: &str,
        role: &str,
        jwt: &JwtConfig,
    ) -> AppResult<(String, i64)> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(jwt.expiry_hours);
        let expires_in = jwt.expiry_hours * 3600;

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            role: role.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(jwt.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok((token, expires_in))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::roles;

    fn jwt(expiry_hours: i64) -> JwtConfig {
        JwtConfig {
            secret: "test-secret-for-moderation".to_string(),
            expiry_hours,
        }
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = AuthService::hash_password("correct horse").unwrap();
        assert!(AuthService::verify_password("correct horse", &hash).unwrap());
        assert!(!AuthService::verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_issue_and_verify_token() {
        let config = jwt(24);
        let id = Uuid::new_v4();
        let (token, expires_in) =
            AuthService::issue_token(&id, "mod_anna", roles::ADMIN, &config).unwrap();

        assert_eq!(expires_in, 24 * 3600);

        let claims = AuthService::verify_token(&token, &config.secret).unwrap();
        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.role, roles::ADMIN);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let (token, _) =
            AuthService::issue_token(&Uuid::new_v4(), "mod_anna", roles::ADMIN, &jwt(1)).unwrap();
        assert!(matches!(
            AuthService::verify_token(&token, "another-secret"),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token() {
        let (token, _) =
            AuthService::issue_token(&Uuid::new_v4(), "mod_anna", roles::ADMIN, &jwt(-2)).unwrap();
        assert!(matches!(
            AuthService::verify_token(&token, "test-secret-for-moderation"),
            Err(AppError::TokenExpired)
        ));
    }
}
