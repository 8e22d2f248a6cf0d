use sqlx::PgPool;
use tracing::instrument;

use crate::modules::students::model::{CreateStudentDto, Student};
use crate::utils::errors::AppError;

pub struct StudentService;

impl StudentService {
    /// Creates a student. The primary key makes the insert atomic; a
    /// duplicate identifier surfaces as a unique violation, never a race.
    #[instrument(skip(db))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(
            r#"INSERT INTO students (student_id, name, surname, birth_date, enrollment_date)
               VALUES ($1, $2, $3, $4, COALESCE($5, CURRENT_DATE))
               RETURNING student_id, name, surname, birth_date, enrollment_date"#,
        )
        .bind(&dto.student_id)
        .bind(&dto.name)
        .bind(&dto.surname)
        .bind(dto.birth_date)
        .bind(dto.enrollment_date)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow::anyhow!(
                    "A student with this ID already exists"
                ));
            }
            AppError::from(e)
        })?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, student_id: &str) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT student_id, name, surname, birth_date, enrollment_date
             FROM students WHERE student_id = $1",
        )
        .bind(student_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn get_students(
        db: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Student>, i64), AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(db)
            .await?;

        let students = sqlx::query_as::<_, Student>(
            "SELECT student_id, name, surname, birth_date, enrollment_date
             FROM students
             ORDER BY student_id
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        Ok((students, total))
    }

    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, student_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE student_id = $1")
            .bind(student_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn exists(db: &PgPool, student_id: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM students WHERE student_id = $1)",
        )
        .bind(student_id)
        .fetch_one(db)
        .await?;

        Ok(exists)
    }

    /// Students enrolled in at least one course taught by the professor.
    /// `DISTINCT` collapses students taking several of their courses.
    #[instrument(skip(db))]
    pub async fn get_students_of_professor(
        db: &PgPool,
        professor_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Student>, i64), AppError> {
        let professor_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM professors WHERE professor_id = $1)",
        )
        .bind(professor_id)
        .fetch_one(db)
        .await?;

        if !professor_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Professor not found")));
        }

        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(DISTINCT e.student_id)
               FROM enrollments e
               JOIN courses c ON c.course_id = e.course_id
               WHERE c.professor_id = $1"#,
        )
        .bind(professor_id)
        .fetch_one(db)
        .await?;

        let students = sqlx::query_as::<_, Student>(
            r#"SELECT DISTINCT s.student_id, s.name, s.surname, s.birth_date, s.enrollment_date
               FROM students s
               JOIN enrollments e ON e.student_id = s.student_id
               JOIN courses c ON c.course_id = e.course_id
               WHERE c.professor_id = $1
               ORDER BY s.student_id
               LIMIT $2 OFFSET $3"#,
        )
        .bind(professor_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        Ok((students, total))
    }
}
