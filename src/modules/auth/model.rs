use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Closed set of roles a credential can carry.
///
/// Stored in Postgres as the `user_role` enum; serialized over the wire as
/// the lowercase role name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Professor,
    Student,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Professor => "professor",
            UserRole::Student => "student",
        }
    }
}

/// Roles grantable through the registration endpoint. `admin` is deliberately
/// absent; admin credentials are created through the CLI only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RegisterRole {
    Professor,
    Student,
}

impl From<RegisterRole> for UserRole {
    fn from(role: RegisterRole) -> Self {
        match role {
            RegisterRole::Professor => UserRole::Professor,
            RegisterRole::Student => UserRole::Student,
        }
    }
}

/// Public view of a credential. The password hash never leaves the service.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub username: String,
    #[serde(rename = "type")]
    pub role: UserRole,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[serde(rename = "type")]
    pub role: RegisterRole,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub username: String,
    #[serde(rename = "type")]
    pub role: UserRole,
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
