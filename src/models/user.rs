//! User model, requests and JWT claims

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::Role;
use crate::error::AppError;

/// Full user model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub email: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub role: Role,
    pub balance: Decimal,
    pub is_vip: bool,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Short user representation for lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserShort {
    pub id: i32,
    pub email: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub role: Role,
    pub is_vip: bool,
}

/// User query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct UserQuery {
    /// Search in first name, last name or email
    pub name: Option<String>,
    pub role: Option<Role>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(max = 100, message = "First name is too long"))]
    pub firstname: Option<String>,
    #[validate(length(max = 100, message = "Last name is too long"))]
    pub lastname: Option<String>,
    /// Only honoured when an administrator creates the account
    pub role: Option<Role>,
}

/// Update user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    /// Administrator only
    pub role: Option<Role>,
    /// Administrator only
    pub is_vip: Option<bool>,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub role: Role,
    /// Token id, used for revocation
    pub jti: String,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Seconds until the token expires (never negative)
    pub fn remaining_seconds(&self, now: i64) -> u64 {
        (self.exp - now).max(0) as u64
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Require admin privileges
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization("Administrator privileges required".to_string()))
        }
    }

    /// Allow the owner of a resource or an administrator
    pub fn require_self_or_admin(&self, user_id: i32) -> Result<(), AppError> {
        if self.is_admin() || self.user_id == user_id {
            Ok(())
        } else {
            Err(AppError::Authorization("Access restricted to the resource owner".to_string()))
        }
    }

    /// User id a listing should be restricted to (`None` for admins)
    pub fn scope(&self) -> Option<i32> {
        if self.is_admin() {
            None
        } else {
            Some(self.user_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: Role, exp: i64) -> UserClaims {
        UserClaims {
            sub: "jane@example.com".into(),
            user_id: 7,
            role,
            jti: "b0c1".into(),
            exp,
            iat: 0,
        }
    }

    #[test]
    fn token_round_trip_keeps_identity() {
        let exp = Utc::now().timestamp() + 3600;
        let token = claims(Role::Client, exp).create_token("secret").unwrap();
        let parsed = UserClaims::from_token(&token, "secret").unwrap();
        assert_eq!(parsed.user_id, 7);
        assert_eq!(parsed.role, Role::Client);
        assert_eq!(parsed.jti, "b0c1");
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let exp = Utc::now().timestamp() + 3600;
        let token = claims(Role::Client, exp).create_token("secret").unwrap();
        assert!(UserClaims::from_token(&token, "other").is_err());
    }

    #[test]
    fn ownership_guard() {
        let client = claims(Role::Client, 0);
        assert!(client.require_self_or_admin(7).is_ok());
        assert!(client.require_self_or_admin(8).is_err());
        assert!(client.require_admin().is_err());
        assert_eq!(client.scope(), Some(7));

        let admin = claims(Role::Admin, 0);
        assert!(admin.require_self_or_admin(8).is_ok());
        assert_eq!(admin.scope(), None);
    }

    #[test]
    fn remaining_lifetime_is_clamped() {
        let c = claims(Role::Client, 1_000);
        assert_eq!(c.remaining_seconds(400), 600);
        assert_eq!(c.remaining_seconds(2_000), 0);
    }
}
