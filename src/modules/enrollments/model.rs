//! Enrollment domain models and DTOs: the student-course relation, grade
//! results, and the derived rankings.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::pagination::PaginationMeta;

/// A student's enrollment in a course. `result` stays null until graded.
#[derive(Serialize, FromRow, Debug, ToSchema)]
pub struct Enrollment {
    pub student_id: String,
    pub course_id: String,
    pub result: Option<i32>,
}

/// DTO for assigning (or overwriting) a grade result.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct AssignResultDto {
    #[validate(range(min = 0, max = 30, message = "result must be between 0 and 30"))]
    pub result: i32,
}

/// One row of a student's per-course results listing.
#[derive(Serialize, FromRow, Debug, ToSchema)]
pub struct StudentCourseResult {
    pub course_id: String,
    pub name: String,
    pub result: Option<i32>,
}

/// One row of the global student ranking. `rank` uses standard competition
/// ranking: equal averages share a rank and the next rank skips.
#[derive(Serialize, FromRow, Debug, ToSchema)]
pub struct StudentStatistics {
    pub rank: i64,
    pub student_id: String,
    pub name: String,
    pub surname: String,
    pub average_result: f64,
}

/// Paginated global ranking. Ranks are assigned over the whole population
/// before the page window is applied.
#[derive(Serialize, ToSchema)]
pub struct StudentStatisticsResponse {
    pub data: Vec<StudentStatistics>,
    pub meta: PaginationMeta,
}

/// One row of a course's best-student ranking.
#[derive(Serialize, FromRow, Debug, ToSchema)]
pub struct CourseRankingEntry {
    pub rank: i64,
    pub student_id: String,
    pub name: String,
    pub surname: String,
    pub result: i32,
}
