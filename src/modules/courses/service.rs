use sqlx::PgPool;
use tracing::instrument;

use crate::modules::courses::model::{Course, CreateCourseDto};
use crate::utils::errors::AppError;

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db))]
    pub async fn create_course(db: &PgPool, dto: CreateCourseDto) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(
            r#"INSERT INTO courses (course_id, name, description)
               VALUES ($1, $2, $3)
               RETURNING course_id, name, description, professor_id"#,
        )
        .bind(&dto.course_id)
        .bind(&dto.name)
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow::anyhow!(
                    "A course with this ID already exists"
                ));
            }
            AppError::from(e)
        })?;

        Ok(course)
    }

    #[instrument(skip(db))]
    pub async fn get_course(db: &PgPool, course_id: &str) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(
            "SELECT course_id, name, description, professor_id
             FROM courses WHERE course_id = $1",
        )
        .bind(course_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))?;

        Ok(course)
    }

    #[instrument(skip(db))]
    pub async fn get_courses(
        db: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Course>, i64), AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
            .fetch_one(db)
            .await?;

        let courses = sqlx::query_as::<_, Course>(
            "SELECT course_id, name, description, professor_id
             FROM courses
             ORDER BY course_id
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        Ok((courses, total))
    }

    /// Deleting a course cascades to its enrollments.
    #[instrument(skip(db))]
    pub async fn delete_course(db: &PgPool, course_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE course_id = $1")
            .bind(course_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn exists(db: &PgPool, course_id: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM courses WHERE course_id = $1)",
        )
        .bind(course_id)
        .fetch_one(db)
        .await?;

        Ok(exists)
    }

    /// Assigns (or reassigns) a professor to a course as one conditional
    /// update. The foreign key backstops the professor existence check in
    /// case the professor disappears between check and update.
    #[instrument(skip(db))]
    pub async fn assign_professor(
        db: &PgPool,
        professor_id: &str,
        course_id: &str,
    ) -> Result<Course, AppError> {
        let professor_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM professors WHERE professor_id = $1)",
        )
        .bind(professor_id)
        .fetch_one(db)
        .await?;

        if !professor_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Professor not found")));
        }

        let course = sqlx::query_as::<_, Course>(
            r#"UPDATE courses SET professor_id = $1
               WHERE course_id = $2
               RETURNING course_id, name, description, professor_id"#,
        )
        .bind(professor_id)
        .bind(course_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                return AppError::not_found(anyhow::anyhow!("Professor not found"));
            }
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))?;

        Ok(course)
    }
}
