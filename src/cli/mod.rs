use crate::modules::auth::model::UserRole;
use crate::utils::password::hash_password;
use sqlx::PgPool;

pub mod seeder;

/// Inserts an admin credential, leaving any existing row with the same
/// username untouched. Returns `true` when a new row was inserted.
pub async fn create_admin(
    db: &PgPool,
    username: &str,
    password: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let result = sqlx::query(
        "INSERT INTO users (username, password, role)
         VALUES ($1, $2, $3)
         ON CONFLICT (username) DO NOTHING",
    )
    .bind(username)
    .bind(hashed_password)
    .bind(UserRole::Admin)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
