use sqlx::PgPool;
use tracing::instrument;

use crate::modules::professors::model::{CreateProfessorDto, Professor};
use crate::utils::errors::AppError;

pub struct ProfessorService;

impl ProfessorService {
    #[instrument(skip(db))]
    pub async fn create_professor(
        db: &PgPool,
        dto: CreateProfessorDto,
    ) -> Result<Professor, AppError> {
        if let Some(salary) = dto.salary
            && salary <= 0.0
        {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "salary must be positive"
            )));
        }

        let professor = sqlx::query_as::<_, Professor>(
            r#"INSERT INTO professors (professor_id, name, surname, salary, hire_date)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING professor_id, name, surname, salary, hire_date"#,
        )
        .bind(&dto.professor_id)
        .bind(&dto.name)
        .bind(&dto.surname)
        .bind(dto.salary)
        .bind(dto.hire_date)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow::anyhow!(
                    "A professor with this ID already exists"
                ));
            }
            AppError::from(e)
        })?;

        Ok(professor)
    }

    #[instrument(skip(db))]
    pub async fn get_professor(db: &PgPool, professor_id: &str) -> Result<Professor, AppError> {
        let professor = sqlx::query_as::<_, Professor>(
            "SELECT professor_id, name, surname, salary, hire_date
             FROM professors WHERE professor_id = $1",
        )
        .bind(professor_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Professor not found")))?;

        Ok(professor)
    }

    #[instrument(skip(db))]
    pub async fn get_professors(
        db: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Professor>, i64), AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM professors")
            .fetch_one(db)
            .await?;

        let professors = sqlx::query_as::<_, Professor>(
            "SELECT professor_id, name, surname, salary, hire_date
             FROM professors
             ORDER BY professor_id
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        Ok((professors, total))
    }

    /// Deleting a professor leaves their courses in place with no assigned
    /// professor (`ON DELETE SET NULL`).
    #[instrument(skip(db))]
    pub async fn delete_professor(db: &PgPool, professor_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM professors WHERE professor_id = $1")
            .bind(professor_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Professor not found")));
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn exists(db: &PgPool, professor_id: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM professors WHERE professor_id = $1)",
        )
        .bind(professor_id)
        .fetch_one(db)
        .await?;

        Ok(exists)
    }
}
