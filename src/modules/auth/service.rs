use sqlx::PgPool;
use tracing::instrument;

use crate::config::jwt::JwtConfig;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{LoginRequest, LoginResponse, RegisterRequestDto, User, UserRole};

pub struct AuthService;

impl AuthService {
    /// Creates a credential. The username is unique; a duplicate insert is
    /// rejected by the primary key, so there is no lookup-then-insert race.
    #[instrument(skip(db, dto))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequestDto) -> Result<User, AppError> {
        let hashed_password = hash_password(&dto.password)?;
        let role = UserRole::from(dto.role);

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password, role)
             VALUES ($1, $2, $3)
             RETURNING username, role",
        )
        .bind(&dto.username)
        .bind(&hashed_password)
        .bind(role)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow::anyhow!("Username already exists"));
            }
            AppError::from(e)
        })?;

        Ok(user)
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            username: String,
            password: String,
            role: UserRole,
        }

        let user = sqlx::query_as::<_, UserWithPassword>(
            "SELECT username, password, role FROM users WHERE username = $1",
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

        let is_valid = verify_password(&dto.password, &user.password)?;

        if !is_valid {
            return Err(AppError::unauthorized("Invalid username or password"));
        }

        let token = create_access_token(&user.username, user.role, jwt_config)?;

        Ok(LoginResponse {
            username: user.username,
            role: user.role,
            token,
        })
    }
}
