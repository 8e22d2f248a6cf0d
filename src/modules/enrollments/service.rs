use sqlx::PgPool;
use tracing::instrument;

use crate::modules::courses::service::CourseService;
use crate::modules::enrollments::model::{
    CourseRankingEntry, Enrollment, StudentCourseResult, StudentStatistics,
};
use crate::modules::students::service::StudentService;
use crate::utils::errors::AppError;

pub struct EnrollmentService;

impl EnrollmentService {
    /// Enrolls a student in a course. Both endpoints are checked up front
    /// for precise 404s; the insert itself is atomic, with the primary key
    /// catching duplicate pairs and the foreign keys backstopping deletes
    /// that land in the check-to-insert window.
    #[instrument(skip(db))]
    pub async fn enroll_student(
        db: &PgPool,
        student_id: &str,
        course_id: &str,
    ) -> Result<Enrollment, AppError> {
        if !StudentService::exists(db, student_id).await? {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }
        if !CourseService::exists(db, course_id).await? {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"INSERT INTO enrollments (student_id, course_id)
               VALUES ($1, $2)
               RETURNING student_id, course_id, result"#,
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict(anyhow::anyhow!(
                        "Student is already enrolled in this course"
                    ));
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::not_found(anyhow::anyhow!("Student or course not found"));
                }
            }
            AppError::from(e)
        })?;

        Ok(enrollment)
    }

    /// Assigns (or overwrites) the result of one enrollment as a single
    /// conditional update. Zero rows affected means the student is not
    /// enrolled in the course.
    #[instrument(skip(db))]
    pub async fn assign_result(
        db: &PgPool,
        student_id: &str,
        course_id: &str,
        result: i32,
    ) -> Result<Enrollment, AppError> {
        if !StudentService::exists(db, student_id).await? {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }
        if !CourseService::exists(db, course_id).await? {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"UPDATE enrollments SET result = $3
               WHERE student_id = $1 AND course_id = $2
               RETURNING student_id, course_id, result"#,
        )
        .bind(student_id)
        .bind(course_id)
        .bind(result)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!("Student is not enrolled in this course"))
        })?;

        Ok(enrollment)
    }

    /// A student's per-course results, graded or not.
    #[instrument(skip(db))]
    pub async fn student_results(
        db: &PgPool,
        student_id: &str,
    ) -> Result<Vec<StudentCourseResult>, AppError> {
        if !StudentService::exists(db, student_id).await? {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        let results = sqlx::query_as::<_, StudentCourseResult>(
            r#"SELECT e.course_id, c.name, e.result
               FROM enrollments e
               JOIN courses c ON c.course_id = e.course_id
               WHERE e.student_id = $1
               ORDER BY e.course_id"#,
        )
        .bind(student_id)
        .fetch_all(db)
        .await?;

        Ok(results)
    }

    /// Global ranking by average result. Ranks are computed over the whole
    /// population in the subquery, then the page window is applied, so a
    /// student's rank never depends on the requested page. Students with no
    /// graded enrollment are excluded.
    #[instrument(skip(db))]
    pub async fn student_statistics(
        db: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<StudentStatistics>, i64), AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM (
                   SELECT e.student_id
                   FROM enrollments e
                   WHERE e.result IS NOT NULL
                   GROUP BY e.student_id
               ) graded"#,
        )
        .fetch_one(db)
        .await?;

        let statistics = sqlx::query_as::<_, StudentStatistics>(
            r#"SELECT ranked.rank, ranked.student_id, ranked.name, ranked.surname,
                      ranked.average_result
               FROM (
                   SELECT RANK() OVER (ORDER BY AVG(e.result) DESC) AS rank,
                          s.student_id,
                          s.name,
                          s.surname,
                          AVG(e.result)::double precision AS average_result
                   FROM students s
                   JOIN enrollments e ON e.student_id = s.student_id
                   WHERE e.result IS NOT NULL
                   GROUP BY s.student_id, s.name, s.surname
               ) ranked
               ORDER BY ranked.rank, ranked.student_id
               LIMIT $1 OFFSET $2"#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        Ok((statistics, total))
    }

    /// Best students of one course, standard competition ranking over the
    /// graded enrollments: equal results share a rank, the next rank skips.
    #[instrument(skip(db))]
    pub async fn course_ranking(
        db: &PgPool,
        course_id: &str,
    ) -> Result<Vec<CourseRankingEntry>, AppError> {
        if !CourseService::exists(db, course_id).await? {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        let ranking = sqlx::query_as::<_, CourseRankingEntry>(
            r#"SELECT RANK() OVER (ORDER BY e.result DESC) AS rank,
                      s.student_id,
                      s.name,
                      s.surname,
                      e.result
               FROM enrollments e
               JOIN students s ON s.student_id = e.student_id
               WHERE e.course_id = $1 AND e.result IS NOT NULL
               ORDER BY rank, s.student_id"#,
        )
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(ranking)
    }
}
